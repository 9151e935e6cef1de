/*!

# Quick start

This example walks through one report run end to end, starting from a case
tracking spreadsheet exported in the Excel format (xlsx).

The expected layout is a single worksheet named `Sheet1` whose first row is
the header. The first 16 columns are loaded by position, and the column at
ordinal 10 (0-indexed) holds the date each case was last updated. A typical
export looks like this:

| EQUIPO | USUARIO | ESTADO | ... | FECHA | ... |
|--------|---------|--------|-----|-------|-----|
| norte  | ana     | abierto| ... | 2022-11-08 | ... |
| norte  | ana     | cerrado| ... | 2022-11-08 | ... |
| sur    | luis    | abierto| ... | 2022-11-15 | ... |

Run `informes` against the file, with an output directory for the per-user
reports:

```bash
informes -i casos.xlsx -o informes/
```

The program prints a JSON summary of the run (reporting week, aggregate
counts per team, user and notification status) to the standard output, and
writes one HTML file per distinct user into `informes/`, plus a
`informes.zip` archive bundling them for download.

The date anchoring the week numbering and the worksheet name can be changed
without recompiling:

```bash
informes -i casos.xlsx --worksheet Casos --reference-date 2023-01-01
```

If you are checking a run against a previously saved summary, pass it with
`--reference`; the program prints a diff and fails when the two disagree.

From Rust, the same derivations are available without any file I/O through
[`RecordTable`](crate::RecordTable), [`reference_week`](crate::week::reference_week),
[`count_by`](crate::counts::count_by) and the [`html`](crate::html) module:

```ignore
use case_report::{RecordTable, ReportConfig};
use case_report::week::reference_week;

let config = ReportConfig::default();
let table: RecordTable = load_table_somehow()?;
let dates = &table.columns()[config.date_column];
let week = reference_week(&dates.cells, config.reference_date);
println!("{} ({})", week.label(), week.max_date_formatted());
```

*/
