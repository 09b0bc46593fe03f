use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use orbis_model::{ColumnType, IssueRecord, ProfileRecord, RunMetadata, format_numeric};

use crate::types::RunOutcome;

pub fn print_summary(outcome: &RunOutcome) {
    let run = &outcome.run;
    println!("Run: {}", run.id());
    println!("Sources: {}", run.sources().join(", "));
    println!(
        "Rows: {} merged, {} cleaned ({} duplicates removed)",
        run.merged().row_count(),
        run.cleaned().row_count(),
        run.duplicates_removed()
    );
    if !run.dropped_columns().is_empty() {
        println!("Dropped empty columns: {}", run.dropped_columns().join(", "));
    }
    match &outcome.stored {
        Some(metadata) => {
            println!(
                "Output: {}",
                outcome.output_dir.join(metadata.run_id.as_str()).display()
            );
            if let Some(path) = &metadata.artifacts.duckdb {
                println!("DuckDB: {}", path.display());
            }
        }
        None => println!("Output: none (dry run)"),
    }
    println!("{}", profile_table(run.profiles()));
    if let Some(table) = issue_table(run.issues()) {
        println!();
        println!("Issues:");
        println!("{table}");
    } else {
        println!("No issues detected.");
    }
}

pub fn print_runs(runs: &[RunMetadata]) {
    if runs.is_empty() {
        println!("No runs recorded.");
        return;
    }
    println!("{}", runs_table(runs));
}

fn profile_table(profiles: &[ProfileRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Non-null"),
        header_cell("Null %"),
        header_cell("Unique"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Mean"),
        header_cell("Samples"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for profile in profiles {
        table.add_row(vec![
            Cell::new(&profile.column_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            type_cell(profile.dtype),
            Cell::new(profile.non_null_count),
            percent_cell(profile.null_pct),
            Cell::new(profile.num_unique),
            stat_cell(profile.min),
            stat_cell(profile.max),
            stat_cell(profile.mean),
            samples_cell(&profile.sample_values),
        ]);
    }
    table
}

fn issue_table(issues: &[IssueRecord]) -> Option<Table> {
    if issues.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Issue"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Pct"),
        header_cell("Details"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in issues {
        let column = if issue.issue_type.is_table_level() {
            dim_cell("-")
        } else {
            Cell::new(&issue.column)
        };
        table.add_row(vec![
            Cell::new(issue.issue_type.as_str()).fg(Color::Yellow),
            column,
            count_cell(issue.count, Color::Yellow),
            Cell::new(format_percent(issue.pct)),
            Cell::new(&issue.details),
        ]);
    }
    Some(table)
}

fn runs_table(runs: &[RunMetadata]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Run"),
        header_cell("Finished"),
        header_cell("Sources"),
        header_cell("Merged"),
        header_cell("Cleaned"),
        header_cell("Duplicates"),
        header_cell("Issues"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for run in runs {
        table.add_row(vec![
            Cell::new(run.run_id.as_str()).fg(Color::Blue),
            Cell::new(run.finished_at.format("%Y-%m-%d %H:%M:%S UTC")),
            Cell::new(run.sources.len()),
            Cell::new(run.merged_rows),
            Cell::new(run.cleaned_rows),
            count_cell(run.duplicates_removed, Color::Yellow),
            count_cell(run.issue_count, Color::Yellow),
        ]);
    }
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 9 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn type_cell(dtype: ColumnType) -> Cell {
    match dtype {
        ColumnType::Numeric => Cell::new(dtype.as_str()).fg(Color::Green),
        ColumnType::Text => Cell::new(dtype.as_str()),
    }
}

fn percent_cell(fraction: f64) -> Cell {
    if fraction > 0.0 {
        Cell::new(format_percent(fraction))
    } else {
        dim_cell(format_percent(fraction))
    }
}

fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

fn stat_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_numeric(value)),
        None => dim_cell("-"),
    }
}

fn samples_cell(samples: &[String]) -> Cell {
    if samples.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(samples.join(", "))
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
