//! Numeric text parsing and formatting.
//!
//! The accepted grammar, after trimming surrounding whitespace:
//!
//! ```text
//! [+-]? ( digits ( '.' digits? )? | '.' digits ) ( [eE] [+-]? digits )?
//! ```
//!
//! Thousands separators, currency and percent signs, `NaN`, `inf` and hex
//! literals are rejected.

use serde::Serialize;

use crate::table::CellValue;

/// Parses `value` under the numeric grammar, returning `None` when it does not match.
///
/// # Examples
///
/// ```
/// use orbis_model::parse_numeric;
///
/// assert_eq!(parse_numeric(" -1.5 "), Some(-1.5));
/// assert_eq!(parse_numeric("1e3"), Some(1000.0));
/// assert_eq!(parse_numeric("1,000"), None);
/// assert_eq!(parse_numeric("NaN"), None);
/// ```
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if !matches_grammar(trimmed.as_bytes()) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns true when `value` parses under the numeric grammar.
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}

/// How much of a text column parses as numeric.
///
/// Cells that are missing or blank after trimming carry no evidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumericEvidence {
    pub evidence: usize,
    pub parseable: usize,
}

impl NumericEvidence {
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut out = Self::default();
        for cell in cells {
            let Some(text) = cell.as_text() else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            out.evidence += 1;
            if is_numeric(text) {
                out.parseable += 1;
            }
        }
        out
    }

    /// Parseable share of the evidence, `None` when there is no evidence.
    pub fn fraction(&self) -> Option<f64> {
        (self.evidence > 0).then(|| self.parseable as f64 / self.evidence as f64)
    }
}

/// Outcome of the coercion heuristic for one text column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoercionDecision {
    pub column: String,
    pub evidence: usize,
    pub parseable: usize,
    /// `None` when the column had no evidence.
    pub fraction: Option<f64>,
    pub coerced: bool,
    /// Non-blank cells that did not parse and were set to missing.
    pub skipped: usize,
}

fn matches_grammar(bytes: &[u8]) -> bool {
    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Formats a float without trailing zeros after the decimal point.
///
/// ```
/// use orbis_model::format_numeric;
///
/// assert_eq!(format_numeric(40.0), "40");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(-0.0), "0");
/// ```
pub fn format_numeric(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let s = format!("{value}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_grammar_forms() {
        for (input, expected) in [
            ("1", 1.0),
            ("-1.5", -1.5),
            ("+.5", 0.5),
            ("2.", 2.0),
            ("1e3", 1000.0),
            ("6.02E+23", 6.02e23),
            ("  42\t", 42.0),
            ("007", 7.0),
        ] {
            assert_eq!(parse_numeric(input), Some(expected), "input {input:?}");
        }
    }

    #[test]
    fn rejects_non_grammar_forms() {
        for input in [
            "", " ", "1,000", "$5", "5%", "NaN", "nan", "inf", "-Infinity", "0x1F", "1 2", ".",
            "-", "1e", "e5", "1.2.3", "abc", "1e1000",
        ] {
            assert_eq!(parse_numeric(input), None, "input {input:?}");
        }
    }

    #[test]
    fn evidence_ignores_missing_and_blank() {
        let cells = [
            CellValue::text("1"),
            CellValue::text(" "),
            CellValue::Missing,
            CellValue::text("x"),
            CellValue::Number(3.0),
        ];
        let evidence = NumericEvidence::from_cells(&cells);
        assert_eq!(
            evidence,
            NumericEvidence {
                evidence: 2,
                parseable: 1
            }
        );
        assert_eq!(evidence.fraction(), Some(0.5));
        assert_eq!(NumericEvidence::default().fraction(), None);
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(0.25), "0.25");
        assert_eq!(format_numeric(-12.5), "-12.5");
        assert_eq!(format_numeric(100.0), "100");
    }
}
