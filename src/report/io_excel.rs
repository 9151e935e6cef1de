// Loading the spreadsheet into a record table.
//
// The spreadsheet's physical column order is the contract: exactly the first
// `num_columns` columns are kept, selected by position, and the column at the
// configured date ordinal is parsed as dates. A date cell that cannot be
// understood becomes a missing value, never a load failure.

use calamine::{open_workbook_auto, DataType, Reader};

use chrono::NaiveDate;

use log::debug;
use snafu::prelude::*;

use case_report::{CellValue, Column, RecordTable, ReportConfig};

use crate::report::{
    BadTableSnafu, EmptyWorksheetSnafu, MissingSheetSnafu, OpeningExcelSnafu, ReportResult,
    TooFewColumnsSnafu,
};

pub fn read_record_table(path: &str, config: &ReportConfig) -> ReportResult<RecordTable> {
    debug!(
        "read_record_table: path: {:?} worksheet: {:?}",
        path, config.sheet_name
    );
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range(&config.sheet_name)
        .context(MissingSheetSnafu {
            sheet: &config.sheet_name,
            path,
        })?
        .context(OpeningExcelSnafu { path })?;
    table_from_rows(wrange.rows(), config)
}

/// Builds the record table from raw sheet rows, the first one being the
/// header. Kept separate from the workbook plumbing so tests can feed rows
/// directly.
pub fn table_from_rows<'a, I>(mut rows: I, config: &ReportConfig) -> ReportResult<RecordTable>
where
    I: Iterator<Item = &'a [DataType]>,
{
    let header = rows.next().context(EmptyWorksheetSnafu {})?;
    debug!("table_from_rows: header: {:?}", header);
    ensure!(
        header.len() >= config.num_columns,
        TooFewColumnsSnafu {
            found: header.len(),
            required: config.num_columns,
        }
    );
    let names = header_names(&header[..config.num_columns]);

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); config.num_columns];
    for row in rows {
        for (idx, col) in cells.iter_mut().enumerate() {
            let cell = row.get(idx).unwrap_or(&DataType::Empty);
            let value = if idx == config.date_column {
                date_cell(cell)
            } else {
                plain_cell(cell)
            };
            col.push(value);
        }
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column { name, cells })
        .collect();
    RecordTable::from_columns(columns).context(BadTableSnafu {})
}

// Header cells become column names; blank or repeated names get a positional
// fallback so the table never rejects a sheet over its header.
fn header_names(header: &[DataType]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for (idx, cell) in header.iter().enumerate() {
        let base = match cell {
            DataType::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => format!("COL_{}", idx + 1),
        };
        let mut name = base.clone();
        let mut suffix = 2;
        while names.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }
    names
}

fn plain_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(s) if s.trim().is_empty() => CellValue::Missing,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::Int(i) => CellValue::Number(*i as f64),
        DataType::Bool(b) => CellValue::Text(b.to_string()),
        DataType::DateTime(f) => match serial_to_date(*f) {
            Some(d) => CellValue::Date(d),
            None => CellValue::Number(*f),
        },
        _ => CellValue::Missing,
    }
}

fn date_cell(cell: &DataType) -> CellValue {
    let parsed = match cell {
        DataType::DateTime(f) => serial_to_date(*f),
        DataType::Float(f) => serial_to_date(*f),
        DataType::Int(i) => serial_to_date(*i as f64),
        DataType::String(s) => parse_date_text(s),
        _ => None,
    };
    match parsed {
        Some(d) => CellValue::Date(d),
        None => CellValue::Missing,
    }
}

// Excel serial dates count days from 1899-12-30 (the 1900 leap-year bug is
// part of the offset).
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    base.checked_add_signed(chrono::Duration::days(serial as i64))
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let t = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(t, fmt) {
            return Some(dt.date());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportError;

    fn s(v: &str) -> DataType {
        DataType::String(v.to_string())
    }

    fn test_config() -> ReportConfig {
        ReportConfig::default()
    }

    fn wide_header(extra: usize) -> Vec<DataType> {
        (0..16 + extra).map(|i| s(&format!("C{}", i))).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn keeps_exactly_sixteen_columns_in_row_order() {
        let header = wide_header(3);
        let mut row1: Vec<DataType> = vec![DataType::Empty; 19];
        row1[0] = s("first");
        let mut row2: Vec<DataType> = vec![DataType::Empty; 19];
        row2[0] = s("second");
        let rows = vec![header, row1, row2];
        let table = table_from_rows(rows.iter().map(|r| r.as_slice()), &test_config()).unwrap();
        assert_eq!(table.num_columns(), 16);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(
            table.column("C0").unwrap().cells,
            vec![
                CellValue::Text("first".to_string()),
                CellValue::Text("second".to_string())
            ]
        );
    }

    #[test]
    fn fewer_than_sixteen_columns_is_fatal() {
        let header: Vec<DataType> = (0..10).map(|i| s(&format!("C{}", i))).collect();
        let rows = vec![header];
        let res = table_from_rows(rows.iter().map(|r| r.as_slice()), &test_config());
        match res {
            Err(ReportError::TooFewColumns { found, required }) => {
                assert_eq!(found, 10);
                assert_eq!(required, 16);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn empty_sheet_is_fatal() {
        let rows: Vec<Vec<DataType>> = vec![];
        let res = table_from_rows(rows.iter().map(|r| r.as_slice()), &test_config());
        assert!(matches!(res, Err(ReportError::EmptyWorksheet {})));
    }

    #[test]
    fn date_column_parses_serials_and_strings() {
        let header = wide_header(0);
        let mut rows = vec![header];
        for cell in [
            // Excel serial for 2022-11-01.
            DataType::Float(44866.0),
            DataType::DateTime(44866.25),
            s("2022-11-01"),
            s("01/11/2022"),
            s("2022-11-01 09:30:00"),
            s("not a date"),
            DataType::Empty,
        ] {
            let mut row: Vec<DataType> = vec![DataType::Empty; 16];
            row[10] = cell;
            rows.push(row);
        }
        let table = table_from_rows(rows.iter().map(|r| r.as_slice()), &test_config()).unwrap();
        let cells = &table.column("C10").unwrap().cells;
        let expected = CellValue::Date(date(2022, 11, 1));
        for parsed in &cells[..5] {
            assert_eq!(parsed, &expected);
        }
        assert_eq!(cells[5], CellValue::Missing);
        assert_eq!(cells[6], CellValue::Missing);
    }

    #[test]
    fn short_rows_are_padded_with_missing() {
        let header = wide_header(0);
        let rows = vec![header, vec![s("x")]];
        let table = table_from_rows(rows.iter().map(|r| r.as_slice()), &test_config()).unwrap();
        assert_eq!(table.column("C1").unwrap().cells, vec![CellValue::Missing]);
    }

    #[test]
    fn blank_and_duplicate_header_cells_get_positional_names() {
        let mut header = wide_header(0);
        header[0] = s("USUARIO");
        header[1] = s("USUARIO");
        header[2] = DataType::Empty;
        let names = header_names(&header);
        assert_eq!(names[0], "USUARIO");
        assert_eq!(names[1], "USUARIO_2");
        assert_eq!(names[2], "COL_3");
    }

    #[test]
    fn numeric_cells_stay_numeric_outside_the_date_column() {
        let header = wide_header(0);
        let mut row: Vec<DataType> = vec![DataType::Empty; 16];
        row[0] = DataType::Float(12345.0);
        row[1] = DataType::Int(7);
        let rows = vec![header, row];
        let table = table_from_rows(rows.iter().map(|r| r.as_slice()), &test_config()).unwrap();
        assert_eq!(
            table.column("C0").unwrap().cells,
            vec![CellValue::Number(12345.0)]
        );
        assert_eq!(
            table.column("C1").unwrap().cells,
            vec![CellValue::Number(7.0)]
        );
    }
}
