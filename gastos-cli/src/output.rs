//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};

use gastos_core::{CellValue, Grid, Summary};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Amount with two decimals and the euro sign
pub fn format_amount(amount: f64) -> String {
    format!("{:.2} €", amount)
}

fn amount_cell(amount: f64) -> Cell {
    Cell::new(format_amount(amount)).set_alignment(CellAlignment::Right)
}

/// Headline totals followed by the per-category breakdown
pub fn summary_table(summary: &Summary) -> Table {
    let mut table = create_table();
    table.set_header(vec!["", "Amount"]);

    table.add_row(vec![Cell::new("Ingresos"), amount_cell(summary.totals.income)]);
    for category in &summary.expenses_by_category {
        table.add_row(vec![Cell::new(format!("  {}", category.name)), amount_cell(category.amount)]);
    }
    table.add_row(vec![Cell::new("Total gastos"), amount_cell(summary.totals.expenses)]);
    table.add_row(vec![Cell::new("Ahorro"), amount_cell(summary.totals.savings)]);
    table.add_row(vec![Cell::new("Inversión"), amount_cell(summary.totals.investment)]);

    let balance = format_amount(summary.balance);
    let balance = if summary.balance < 0.0 {
        balance.red().to_string()
    } else {
        balance.green().to_string()
    };
    table.add_row(vec![
        Cell::new("Balance".bold().to_string()),
        Cell::new(balance).set_alignment(CellAlignment::Right),
    ]);
    table
}

/// The raw grid, first row as header
pub fn grid_table(grid: &Grid) -> Table {
    let mut table = create_table();
    if let Some(headers) = grid.headers() {
        table.set_header(headers.iter().map(|c| c.text().into_owned()));
    }
    for row in grid.data_rows() {
        table.add_row(row.iter().map(CellValue::text).map(|t| t.into_owned()));
    }
    table
}
