//! CSV reading into text tables.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, SerReader};

use orbis_model::Table;

use crate::error::{IngestError, Result};

const UTF8_BOM: char = '\u{feff}';

/// One ingested file: its table plus the file name used as provenance.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub source: String,
    pub table: Table,
}

/// Rejects UTF-16 input, which Polars would read as garbage.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a CSV file with a single header row. Every column is read as text;
/// empty fields become `Missing`.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    validate_encoding(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let names = header_names(path)?;
    Table::from_string_frame(&df)
        .and_then(|table| table.rename_columns(&names))
        .map_err(|source| IngestError::Table {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads the header record as written, without a leading BOM.
///
/// Polars renames repeated labels to `<label>_duplicated_<n>`. Here a repeat
/// takes the smallest free `_2`, `_3`… suffix instead, in order of first
/// appearance.
fn header_names(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let record = match reader.records().next() {
        Some(record) => record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };

    let labels: Vec<&str> = record
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            if idx == 0 {
                label.trim_start_matches(UTF8_BOM)
            } else {
                label
            }
        })
        .collect();
    let mut taken: HashSet<String> = labels.iter().copied().map(String::from).collect();
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(labels.len());
    for label in labels {
        if seen.insert(label) {
            names.push(label.to_string());
            continue;
        }
        let mut suffix = 2;
        let mut candidate = format!("{label}_{suffix}");
        while taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{label}_{suffix}");
        }
        tracing::warn!(
            path = %path.display(),
            column = label,
            renamed = %candidate,
            "repeated header label"
        );
        taken.insert(candidate.clone());
        names.push(candidate);
    }
    Ok(names)
}

/// Reads one source file and tags it with its file name.
pub fn read_source(path: &Path) -> Result<SourceTable> {
    let table = read_csv_table(path)?;
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    tracing::debug!(
        source = %source,
        rows = table.row_count(),
        columns = table.column_count(),
        "read source file"
    );
    Ok(SourceTable { source, table })
}

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbis_model::{CellValue, ColumnType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_reads_every_column_as_text() {
        let file = create_temp_csv(b"Origin,Tons\nTX,12\nCA,003\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["Origin", "Tons"]);
        assert!(table.columns().iter().all(|c| c.dtype == ColumnType::Text));
        assert_eq!(table.cell(1, 1), Some(&CellValue::text("003")));
    }

    #[test]
    fn test_empty_fields_are_missing() {
        let file = create_temp_csv(b"a,b\n1,\n,2\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.cell(0, 1), Some(&CellValue::Missing));
        assert_eq!(table.cell(1, 0), Some(&CellValue::Missing));
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let file = create_temp_csv(b"a,b\n");
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_repeated_header_labels_take_numeric_suffixes() {
        let file = create_temp_csv(b"Tons,Tons,TONS,Tons_2\n1,2,3,4\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["Tons", "Tons_3", "TONS", "Tons_2"]
        );
        assert_eq!(table.cell(0, 1), Some(&CellValue::text("2")));
    }

    #[test]
    fn test_strips_utf8_bom() {
        let file = create_temp_csv("\u{feff}A,B\n1,2\n".as_bytes());
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table.columns()[0].name, "A");
    }

    #[test]
    fn test_rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'a', 0]);
        let result = read_csv_table(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_empty_file() {
        let file = create_temp_csv(b"");
        assert!(matches!(
            read_csv_table(file.path()),
            Err(IngestError::EmptyCsv { .. })
        ));
    }
}
