use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, ColumnConstraint, ContentArrangement, Table, Width,
};

use hoa_model::{IGNORE_FIELD, RowCounts, ValidationResult};

use crate::types::{ImportReport, MapReport};

pub fn print_map_report(report: &MapReport) {
    println!("File: {}", report.file.display());
    println!("Entity: {}", report.entity);
    println!("Rows: {}", report.row_count);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source Column"),
        header_cell("Target Field"),
        header_cell("Origin"),
    ]);
    apply_report_table_style(&mut table);
    for row in &report.mappings {
        let target_cell = if row.target == IGNORE_FIELD {
            dim_cell(&row.target)
        } else {
            Cell::new(&row.target).fg(comfy_table::Color::Green)
        };
        table.add_row(vec![
            Cell::new(&row.source),
            target_cell,
            origin_cell(&row.origin),
        ]);
    }
    println!("{table}");
    print_validation("Mapping check", &report.structural);
}

pub fn print_import_report(report: &ImportReport) {
    println!("File: {}", report.file.display());
    println!("Entity: {}", report.entity);
    print_validation("Mapping check", &report.structural);

    if let Some(validation) = &report.row_validation {
        print_row_counts(&validation.row_counts);
        print_validation("Row check", validation);
    }
    if report.dry_run {
        println!("Dry run: no records committed.");
        return;
    }
    let Some(result) = &report.result else {
        return;
    };
    if result.success {
        println!(
            "Imported {} record(s), {} with warnings.",
            result.records_imported, result.records_with_warnings
        );
    } else {
        println!(
            "Import failed after {} record(s): {}",
            result.records_imported,
            result.error_message.as_deref().unwrap_or("unknown error")
        );
    }
    if let Some(path) = &report.output {
        println!("Output: {}", path.display());
    }
}

fn print_row_counts(counts: &RowCounts) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total"),
        header_cell("Valid"),
        header_cell("Warnings"),
        header_cell("Errors"),
    ]);
    apply_report_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(counts.total),
        count_cell(counts.valid, comfy_table::Color::Green),
        count_cell(counts.warnings, comfy_table::Color::Yellow),
        count_cell(counts.errors, comfy_table::Color::Red),
    ]);
    println!("{table}");
}

fn print_validation(label: &str, result: &ValidationResult) {
    if result.is_valid {
        println!("{label}: OK");
        return;
    }
    println!("{label}: FAILED");
    for error in &result.errors {
        eprintln!("- {error}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() == 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn origin_cell(origin: &str) -> Cell {
    if origin == "unmatched" {
        dim_cell(origin)
    } else if origin == "operator" {
        Cell::new(origin).fg(comfy_table::Color::Cyan)
    } else {
        Cell::new(origin)
    }
}

fn count_cell(count: usize, color: comfy_table::Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(comfy_table::Color::DarkGrey)
}
