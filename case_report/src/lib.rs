mod config;
pub mod counts;
pub mod format;
pub mod html;
pub mod quick_start;
pub mod week;

use log::debug;

use std::error::Error;
use std::fmt::Display;

use chrono::NaiveDate;

pub use crate::config::*;

/// The content of a single cell of the record table.
///
/// A cell that could not be interpreted (empty, error marker, unparseable
/// date) is `Missing`. Missing values are excluded from comparisons and
/// max-finding, they are never treated as the smallest or largest value.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// The value used to group rows together. Missing cells have no key.
    ///
    /// This is a grouping identity, not a display string: numbers drop a
    /// trailing `.0` and dates use the ISO form. Display formatting lives in
    /// the [`format`] module.
    pub fn group_key(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => {
                if n.fract() == 0.0 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            CellValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            CellValue::Missing => None,
        }
    }
}

/// A named column and its cells, in source row order.
#[derive(PartialEq, Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

/// The loaded, column-restricted spreadsheet data.
///
/// The column set and order are fixed at construction; all columns have the
/// same number of cells and rows keep the order of the source sheet.
#[derive(PartialEq, Debug, Clone)]
pub struct RecordTable {
    columns: Vec<Column>,
    num_rows: usize,
}

/// Errors that prevent a table from being assembled.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TableErrors {
    ColumnLengthMismatch,
    DuplicateColumnName(String),
}

impl Error for TableErrors {}

impl Display for TableErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableErrors::ColumnLengthMismatch => {
                write!(f, "columns have different numbers of cells")
            }
            TableErrors::DuplicateColumnName(name) => {
                write!(f, "duplicate column name: {}", name)
            }
        }
    }
}

impl RecordTable {
    pub fn from_columns(columns: Vec<Column>) -> Result<RecordTable, TableErrors> {
        let num_rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        if columns.iter().any(|c| c.cells.len() != num_rows) {
            return Err(TableErrors::ColumnLengthMismatch);
        }
        for (idx, c) in columns.iter().enumerate() {
            if columns[..idx].iter().any(|c2| c2.name == c.name) {
                return Err(TableErrors::DuplicateColumnName(c.name.clone()));
            }
        }
        debug!("from_columns: {} columns, {} rows", columns.len(), num_rows);
        Ok(RecordTable { columns, num_rows })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The distinct non-missing values of a column, in first-seen order.
    ///
    /// Returns `None` when the column does not exist: callers are expected to
    /// skip the dependent step silently rather than fail.
    pub fn distinct_values(&self, column: &str) -> Option<Vec<String>> {
        let col = self.column(column)?;
        let mut seen: Vec<String> = Vec::new();
        for cell in col.cells.iter() {
            if let Some(key) = cell.group_key() {
                if !seen.contains(&key) {
                    seen.push(key);
                }
            }
        }
        Some(seen)
    }

    /// The subset of rows whose cell in `column` groups under `value`, in the
    /// original row order. The column layout is preserved.
    pub fn partition(&self, column: &str, value: &str) -> Option<RecordTable> {
        let col = self.column(column)?;
        let indices: Vec<usize> = col
            .cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| match cell.group_key() {
                Some(key) if key == value => Some(idx),
                _ => None,
            })
            .collect();
        Some(self.select_rows(&indices))
    }

    fn select_rows(&self, indices: &[usize]) -> RecordTable {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                cells: indices.iter().map(|idx| c.cells[*idx].clone()).collect(),
            })
            .collect();
        RecordTable {
            columns,
            num_rows: indices.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sample_table() -> RecordTable {
        RecordTable::from_columns(vec![
            Column {
                name: "USUARIO".to_string(),
                cells: vec![text("ana"), text("luis"), CellValue::Missing, text("ana")],
            },
            Column {
                name: "ESTADO".to_string(),
                cells: vec![
                    text("abierto"),
                    text("cerrado"),
                    text("abierto"),
                    text("cerrado"),
                ],
            },
        ])
        .unwrap()
    }

    #[test]
    fn mismatched_column_lengths_are_rejected() {
        let res = RecordTable::from_columns(vec![
            Column {
                name: "A".to_string(),
                cells: vec![text("x")],
            },
            Column {
                name: "B".to_string(),
                cells: vec![],
            },
        ]);
        assert_eq!(res, Err(TableErrors::ColumnLengthMismatch));
    }

    #[test]
    fn duplicate_column_names_are_rejected() {
        let res = RecordTable::from_columns(vec![
            Column {
                name: "A".to_string(),
                cells: vec![],
            },
            Column {
                name: "A".to_string(),
                cells: vec![],
            },
        ]);
        assert_eq!(res, Err(TableErrors::DuplicateColumnName("A".to_string())));
    }

    #[test]
    fn distinct_values_first_seen_order_excludes_missing() {
        let table = sample_table();
        assert_eq!(
            table.distinct_values("USUARIO"),
            Some(vec!["ana".to_string(), "luis".to_string()])
        );
        assert_eq!(table.distinct_values("EQUIPO"), None);
    }

    #[test]
    fn partition_keeps_row_order_and_layout() {
        let table = sample_table();
        let part = table.partition("USUARIO", "ana").unwrap();
        assert_eq!(part.num_rows(), 2);
        assert_eq!(part.num_columns(), 2);
        assert_eq!(
            part.column("ESTADO").unwrap().cells,
            vec![text("abierto"), text("cerrado")]
        );
    }

    #[test]
    fn group_key_normalizes_whole_numbers() {
        assert_eq!(CellValue::Number(3.0).group_key(), Some("3".to_string()));
        assert_eq!(CellValue::Number(2.5).group_key(), Some("2.5".to_string()));
        assert_eq!(CellValue::Missing.group_key(), None);
    }
}
