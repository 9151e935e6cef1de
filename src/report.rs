use log::info;
use snafu::{prelude::*, Snafu};

use std::path::Path;

use chrono::NaiveDate;

use case_report::ReportConfig;

use text_diff::print_diff;

use crate::args::Args;

pub mod html_out;
pub mod io_excel;
pub mod summary;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {sheet} not found in {path}"))]
    MissingSheet { sheet: String, path: String },
    #[snafu(display("The worksheet has no header row"))]
    EmptyWorksheet {},
    #[snafu(display("Expected at least {required} columns, found {found}"))]
    TooFewColumns { found: usize, required: usize },
    #[snafu(display("Malformed table"))]
    BadTable { source: case_report::TableErrors },
    #[snafu(display("Cannot parse the reference date {value}, expected YYYY-MM-DD"))]
    BadReferenceDate { value: String },
    #[snafu(display("Error opening summary file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error creating output directory {path}"))]
    CreatingOutputDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing the report for {entity}"))]
    ReportWrite {
        source: std::io::Error,
        entity: String,
    },
    #[snafu(display("Error writing archive {path}"))]
    ArchiveWrite {
        source: zip::result::ZipError,
        path: String,
    },
    #[snafu(display("Error writing archive {path}"))]
    ArchiveIo {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

fn build_config(args: &Args) -> ReportResult<ReportConfig> {
    let mut config = ReportConfig::default();
    if let Some(worksheet) = &args.worksheet {
        config.sheet_name = worksheet.clone();
    }
    if let Some(value) = &args.reference_date {
        config.reference_date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .context(BadReferenceDateSnafu { value })?;
    }
    Ok(config)
}

/// One full pass: load the sheet, derive the summary, check it against the
/// reference if one is given and write the per-user reports.
pub fn run_report(args: &Args) -> ReportResult<()> {
    let config = build_config(args)?;
    info!(
        "Reading {} (worksheet {:?})",
        args.input, config.sheet_name
    );
    let table = io_excel::read_record_table(&args.input, &config)?;
    info!(
        "Loaded {} rows, columns: {:?}",
        table.num_rows(),
        table.column_names()
    );

    let result_js = summary::build_summary_js(&table, &config)?;
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    println!("{}", pretty_js_stats);

    if args.table {
        println!("{}", case_report::html::render_record_table(&table));
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = summary::read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    if let Some(out_dir) = &args.out {
        let outputs =
            html_out::write_reports(&table, &config, Path::new(out_dir), !args.no_archive)?;
        info!(
            "Reports: {} written, {} failed, archive: {:?}",
            outputs.written.len(),
            outputs.failed.len(),
            outputs.archive
        );
    }

    Ok(())
}
