// Assembling the summary document printed after each run.

use std::fs;

use log::{debug, info};
use snafu::prelude::*;

use serde::Serialize;
use serde_json::Value as JSValue;

use case_report::counts::{count_by, CategorySeries};
use case_report::format::thousands;
use case_report::week::{reference_week, WeekSummary};
use case_report::{ChartTarget, RecordTable, ReportConfig};

use crate::report::{OpeningJsonSnafu, ParsingJsonSnafu, ReportResult};

/// Resolves the declarative chart list against the columns actually present,
/// in one pass, and splits the series between the summary row and the detail
/// section. A requested column that is absent is skipped silently.
pub fn chart_series(
    table: &RecordTable,
    config: &ReportConfig,
) -> (Vec<CategorySeries>, Vec<CategorySeries>) {
    let mut summary: Vec<CategorySeries> = Vec::new();
    let mut detail: Vec<CategorySeries> = Vec::new();
    for spec in config.charts.iter() {
        match count_by(table, &spec.column, &spec.title) {
            Some(series) => match spec.target {
                ChartTarget::Summary => summary.push(series),
                ChartTarget::Detail => detail.push(series),
            },
            None => {
                info!("chart_series: column {} absent, skipping", spec.column);
            }
        }
    }
    (summary, detail)
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekSection {
    pub indice: Option<i64>,
    #[serde(rename = "fechaMax")]
    pub fecha_max: String,
    pub etiqueta: String,
}

impl WeekSection {
    fn from_week(week: &WeekSummary) -> WeekSection {
        WeekSection {
            indice: week.week_index,
            fecha_max: week.max_date_formatted(),
            etiqueta: week.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesValue {
    pub categoria: String,
    pub cuenta: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSection {
    pub columna: String,
    pub titulo: String,
    pub valores: Vec<SeriesValue>,
}

impl SeriesSection {
    fn from_series(series: &CategorySeries) -> SeriesSection {
        SeriesSection {
            columna: series.column.clone(),
            titulo: series.title.clone(),
            valores: series
                .counts
                .iter()
                .map(|c| SeriesValue {
                    categoria: c.category.clone(),
                    cuenta: c.formatted.clone(),
                })
                .collect(),
        }
    }
}

/// The run summary: reporting week, row count and the aggregate series.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub semana: WeekSection,
    pub filas: String,
    pub resumen: Vec<SeriesSection>,
    pub detalle: Vec<SeriesSection>,
}

pub fn build_summary(table: &RecordTable, config: &ReportConfig) -> RunSummary {
    let empty: Vec<case_report::CellValue> = Vec::new();
    let date_cells = table
        .columns()
        .get(config.date_column)
        .map(|c| c.cells.as_slice())
        .unwrap_or(&empty);
    let week = reference_week(date_cells, config.reference_date);
    debug!("build_summary: week: {:?}", week);
    let (summary, detail) = chart_series(table, config);
    RunSummary {
        semana: WeekSection::from_week(&week),
        filas: thousands(table.num_rows() as i64),
        resumen: summary.iter().map(SeriesSection::from_series).collect(),
        detalle: detail.iter().map(SeriesSection::from_series).collect(),
    }
}

/// The summary as a JSON value, for printing and reference comparison.
pub fn build_summary_js(table: &RecordTable, config: &ReportConfig) -> ReportResult<JSValue> {
    serde_json::to_value(build_summary(table, config)).context(ParsingJsonSnafu {})
}

pub fn read_summary(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
