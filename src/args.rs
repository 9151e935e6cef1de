use clap::Parser;

/// Report generator for case-tracking spreadsheets.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The spreadsheet containing the case records (.xlsx or .xls). The first
    /// row is the header and the first 16 columns are loaded by position.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (default Sheet1) The name of the worksheet holding the records.
    #[clap(long, value_parser)]
    pub worksheet: Option<String>,

    /// (directory path or empty) If specified, one HTML report per distinct user is
    /// written to this directory, together with a zip archive bundling them.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, informes will check
    /// that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (date, YYYY-MM-DD, default 2022-11-01) The anchor date for the week numbering.
    #[clap(long, value_parser)]
    pub reference_date: Option<String>,

    /// If passed as an argument, no zip archive of the per-user reports is produced.
    #[clap(long, takes_value = false)]
    pub no_archive: bool,

    /// If passed as an argument, the full formatted table is printed as HTML to the
    /// standard output. The table is never persisted to a file.
    #[clap(long, takes_value = false)]
    pub table: bool,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
