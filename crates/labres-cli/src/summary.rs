//! Human-readable run summary, rendered with comfy-table.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labres_model::{ClassifiedResult, RangeTable, Status, TestCatalog, TestCategory};
use labres_report::group_by_category;

use crate::types::ProcessResult;

pub fn print_summary(result: &ProcessResult) {
    let summary = &result.outcome.summary;
    let cleaning = &summary.cleaning;

    println!(
        "Input: {} ({} rows ingested)",
        result.input.display(),
        result.rows_ingested
    );
    println!(
        "Rows: {} -> {} (empty {}, duplicates {}, outlier values nulled {}, non-numeric {})",
        cleaning.rows_before,
        cleaning.rows_after,
        cleaning.removed_empty,
        cleaning.removed_duplicates,
        cleaning.total_outliers(),
        cleaning.non_numeric_values,
    );
    if let Some(path) = &result.outputs.cleaned_csv {
        println!("Cleaned table: {}", path.display());
    }
    if let Some(path) = &result.outputs.classified_json {
        println!("Classified results: {}", path.display());
    }
    if let Some(path) = &result.outputs.summary_json {
        println!("Summary: {}", path.display());
    }
    if let Some(path) = &result.outputs.charts_json {
        println!("Chart data: {}", path.display());
    }

    if !cleaning.unmapped_columns.is_empty() {
        println!();
        println!("Unmapped columns (review and extend the catalog aliases):");
        for column in &cleaning.unmapped_columns {
            println!("- {column}");
        }
    }

    print_category_table(&result.outcome.classified);
    print_abnormal_table(result);
}

fn print_category_table(results: &[ClassifiedResult]) {
    if results.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Results"),
        header_cell("Low"),
        header_cell("Normal"),
        header_cell("High"),
        header_cell("Unknown"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..=5 {
        align_column(&mut table, idx, CellAlignment::Right);
    }

    let groups = group_by_category(results);
    let mut totals = [0usize; 5];
    for (category, group) in &groups {
        let counts = status_breakdown(group);
        totals[0] += group.len();
        totals[1] += counts[0];
        totals[2] += counts[1];
        totals[3] += counts[2];
        totals[4] += counts[3];
        table.add_row(vec![
            Cell::new(category.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(group.len()),
            count_cell(counts[0], Color::Yellow),
            count_cell(counts[1], Color::Green),
            count_cell(counts[2], Color::Red),
            count_cell(counts[3], Color::DarkGrey),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals[0]).add_attribute(Attribute::Bold),
        count_cell(totals[1], Color::Yellow),
        count_cell(totals[2], Color::Green),
        count_cell(totals[3], Color::Red),
        count_cell(totals[4], Color::DarkGrey),
    ]);
    println!();
    println!("{table}");
}

fn print_abnormal_table(result: &ProcessResult) {
    let abnormal = &result.outcome.summary.abnormal;
    if abnormal.is_empty() {
        println!();
        println!("No abnormal results.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Patient"),
        header_cell("Test"),
        header_cell("Value"),
        header_cell("Status"),
        header_cell("Significant"),
        header_cell("Deviation"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);

    for entry in abnormal {
        table.add_row(vec![
            Cell::new(&entry.patient_id),
            Cell::new(&entry.test_code),
            Cell::new(format!("{:.2}", entry.value)),
            status_cell(entry.status),
            significance_cell(entry.is_significant),
            Cell::new(format!("{:.2}", entry.deviation)),
        ]);
    }
    println!();
    println!("Abnormal results (worst first):");
    println!("{table}");
}

/// Print the canonical catalog with per-test range counts.
pub fn print_catalog(catalog: &TestCatalog, ranges: &RangeTable) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Category"),
        header_cell("Unit"),
        header_cell("Aliases"),
        header_cell("Ranges"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    for test in catalog.iter() {
        let range_count = ranges.for_test(&test.code).count();
        table.add_row(vec![
            Cell::new(&test.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&test.canonical_name),
            category_cell(test.category()),
            Cell::new(test.unit.as_deref().unwrap_or("-")),
            Cell::new(test.aliases.len()),
            count_cell(range_count, Color::Green),
        ]);
    }
    println!("{table}");
    println!("{} tests, {} reference ranges", catalog.len(), ranges.len());
}

/// Counts of LOW / NORMAL / HIGH / UNKNOWN in a group.
fn status_breakdown(results: &[ClassifiedResult]) -> [usize; 4] {
    let mut counts = [0usize; 4];
    for result in results {
        let slot = match result.status {
            Status::Low => 0,
            Status::Normal => 1,
            Status::High => 2,
            Status::Unknown => 3,
        };
        counts[slot] += 1;
    }
    counts
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn status_cell(status: Status) -> Cell {
    match status {
        Status::Low => Cell::new("LOW").fg(Color::Yellow),
        Status::Normal => Cell::new("NORMAL").fg(Color::Green),
        Status::High => Cell::new("HIGH").fg(Color::Red),
        Status::Unknown => Cell::new("UNKNOWN").fg(Color::DarkGrey),
    }
}

fn significance_cell(is_significant: bool) -> Cell {
    if is_significant {
        Cell::new("!").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn category_cell(category: TestCategory) -> Cell {
    Cell::new(category.as_str())
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
