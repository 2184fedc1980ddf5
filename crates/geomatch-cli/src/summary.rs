use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{CollectResult, MatchResult};

pub fn print_match_summary(result: &MatchResult) {
    println!("Lateral: {}", result.lateral_file.display());
    println!("Raw: {}", result.raw_file.display());
    println!("Output: {}", result.output_file.display());
    println!("Policy: {}", result.policy);
    if let Some(gate) = result.threshold {
        println!(
            "Gate: {} degrees (lat {} + lon {})",
            gate.max_score(),
            gate.lat,
            gate.lon
        );
    }
    if let Some(path) = &result.report_json {
        println!("Report: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Matched"),
        count_cell(result.matched, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("No candidates"),
        count_cell(result.no_candidates, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Outside gate"),
        count_cell(result.outside_threshold, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.queries).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Pool: {} candidates, {} unconsumed",
        result.pool,
        result.pool_remaining()
    );
    if let (Some(max), Some(mean)) = (result.max_score, result.mean_score) {
        println!("Scores: max {max:.6}, mean {mean:.6} degrees");
    }
}

pub fn print_collect_summary(result: &CollectResult) {
    println!("Matched table: {}", result.csv_file.display());
    println!("Source: {}", result.source_folder.display());
    println!("Destination: {}", result.destination_folder.display());
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Result"), header_cell("Files")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Copied"),
        count_cell(report.copied_count(), Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Renamed on collision"),
        count_cell(report.renamed_count(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Missing from source"),
        count_cell(report.missing_count(), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Skipped empty cells"),
        dim_cell(report.skipped),
    ]);
    println!("{table}");
    let renamed: Vec<_> = report.copied.iter().filter(|c| c.renamed()).collect();
    if !renamed.is_empty() {
        println!("Renamed:");
        for file in renamed {
            println!("- {} -> {}", file.filename, file.dest_name);
        }
    }
    if !report.missing.is_empty() {
        println!("Missing files:");
        for name in &report.missing {
            println!("- {name}");
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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

fn count_cell(value: usize, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
