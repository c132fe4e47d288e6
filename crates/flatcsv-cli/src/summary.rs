use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use flatcsv_core::{TableOutcome, TableReport};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!();
    println!("{}", summary_table(result));
    println!();
    println!(
        "Done. Flat CSVs (if created) are in: {}",
        result.out_root.display()
    );
    println!();
}

/// Builds the per-table summary with a TOTAL row.
pub fn summary_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Module"),
        header_cell("Table"),
        header_cell("Status"),
        header_cell("Shards"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    let mut total_shards = 0usize;
    let mut total_rows = 0usize;
    for module in &result.modules {
        for report in &module.tables {
            let (shards, rows, columns, output) = match &report.outcome {
                TableOutcome::Consolidated(consolidated) => {
                    total_shards += consolidated.shards;
                    total_rows += consolidated.rows;
                    (
                        Some(consolidated.shards),
                        Some(consolidated.rows),
                        Some(consolidated.columns),
                        Some(consolidated.output.as_path()),
                    )
                }
                _ => (None, None, None, None),
            };
            table.add_row(vec![
                Cell::new(module.module.name()).fg(Color::Cyan),
                Cell::new(&report.table),
                status_cell(report),
                count_cell(shards),
                count_cell(rows),
                count_cell(columns),
                output_cell(output, &result.out_root),
            ]);
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} written", result.consolidated_count()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_shards).add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

fn status_cell(report: &TableReport) -> Cell {
    let color = match report.outcome {
        TableOutcome::Consolidated(_) => Color::Green,
        TableOutcome::AlreadyFlat => Color::DarkGrey,
        TableOutcome::EmptyFolder | TableOutcome::NoRows => Color::Yellow,
        TableOutcome::NotFound => Color::Red,
    };
    Cell::new(report.outcome.label()).fg(color)
}

fn output_cell(path: Option<&Path>, out_root: &Path) -> Cell {
    match path {
        Some(path) => {
            let shown = path.strip_prefix(out_root).unwrap_or(path);
            Cell::new(shown.display())
        }
        None => dim_cell("-"),
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
