// ********* Configuration **********

// The configuration of a report run. Sheet name, reference date and column
// layout are explicit values rather than embedded literals so that callers
// and tests can vary them.

use chrono::NaiveDate;

/// Where a chart series is displayed in the final report.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ChartTarget {
    /// The aggregate row shown at the top of the report.
    Summary,
    /// The expanded section below the data table.
    Detail,
}

/// One requested bar chart: the grouping column, a display title and the
/// presentation target. A spec whose column is absent from the input is
/// skipped silently.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChartSpec {
    pub column: String,
    pub title: String,
    pub target: ChartTarget,
}

impl ChartSpec {
    pub fn new(column: &str, title: &str, target: ChartTarget) -> ChartSpec {
        ChartSpec {
            column: column.to_string(),
            title: title.to_string(),
            target,
        }
    }
}

/// The full configuration of one report run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportConfig {
    /// The worksheet holding the case records.
    pub sheet_name: String,
    /// Anchor date for the 1-based week numbering.
    pub reference_date: NaiveDate,
    /// 0-based ordinal of the column parsed as dates.
    pub date_column: usize,
    /// Number of leading columns loaded from the sheet. The physical column
    /// order of the spreadsheet is a hard contract.
    pub num_columns: usize,
    /// Grouping column for the per-entity reports.
    pub group_column: String,
    pub charts: Vec<ChartSpec>,
}

impl Default for ReportConfig {
    fn default() -> ReportConfig {
        ReportConfig {
            sheet_name: "Sheet1".to_string(),
            // The start of the reporting campaign.
            reference_date: NaiveDate::from_ymd_opt(2022, 11, 1).unwrap(),
            date_column: 10,
            num_columns: 16,
            group_column: "USUARIO".to_string(),
            charts: vec![
                ChartSpec::new("EQUIPO", "Casos por equipo", ChartTarget::Summary),
                ChartSpec::new("USUARIO", "Casos por usuario", ChartTarget::Summary),
                ChartSpec::new("NOTIFICADO", "Casos notificados", ChartTarget::Summary),
                ChartSpec::new("ESTADO", "Casos por estado", ChartTarget::Detail),
            ],
        }
    }
}
