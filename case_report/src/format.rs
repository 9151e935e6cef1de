//! Display formatting for the report surfaces.
//!
//! These functions are purely presentational: they read raw semantic values
//! and produce display strings, they never mutate the underlying table. Each
//! consumer gets its own formatted copy.

use chrono::NaiveDate;

use crate::{CellValue, RecordTable};

/// Groups the digits of an integer in threes from the right, separated by
/// dots: `12345 -> "12.345"`.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let bytes = digits.as_bytes();
    for (idx, b) in bytes.iter().enumerate() {
        if idx > 0 && (bytes.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(*b as char);
    }
    out
}

/// Numeric display rule: zero decimal places, dot as thousands separator.
pub fn format_number(x: f64) -> String {
    thousands(x.round() as i64)
}

/// Date display rule: `DD/MM/YYYY`.
pub fn format_date(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

/// The display string of one cell. Missing cells render as the empty string.
pub fn format_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Date(d) => format_date(*d),
        CellValue::Missing => String::new(),
    }
}

/// An independent row-major formatted copy of the whole table.
pub fn formatted_rows(table: &RecordTable) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(table.num_rows());
    for row_idx in 0..table.num_rows() {
        let row: Vec<String> = table
            .columns()
            .iter()
            .map(|c| format_cell(&c.cells[row_idx]))
            .collect();
        rows.push(row);
    }
    rows
}
