//! Value-frequency aggregation for the bar charts.

use std::collections::HashMap;

use log::debug;

use crate::format::thousands;
use crate::RecordTable;

/// Category under which rows with a missing grouping cell are tallied.
pub const MISSING_CATEGORY: &str = "(vacío)";

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
    /// The count with the thousands separator applied, ready for a bar label.
    pub formatted: String,
}

/// A labeled series of per-category counts for one column, suitable for
/// bar-chart rendering. Categories appear in first-seen row order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CategorySeries {
    pub column: String,
    pub title: String,
    pub counts: Vec<CategoryCount>,
}

impl CategorySeries {
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Tallies the rows of `column` by distinct value. Missing cells form their
/// own [`MISSING_CATEGORY`] group. Returns `None` when the column is absent
/// so that the caller can skip the chart silently.
pub fn count_by(table: &RecordTable, column: &str, title: &str) -> Option<CategorySeries> {
    let col = table.column(column)?;
    let mut order: Vec<String> = Vec::new();
    let mut tally: HashMap<String, u64> = HashMap::new();
    for cell in col.cells.iter() {
        let key = cell
            .group_key()
            .unwrap_or_else(|| MISSING_CATEGORY.to_string());
        if !tally.contains_key(&key) {
            order.push(key.clone());
        }
        *tally.entry(key).or_insert(0) += 1;
    }
    let counts: Vec<CategoryCount> = order
        .into_iter()
        .map(|category| {
            let count = tally[&category];
            CategoryCount {
                category,
                count,
                formatted: thousands(count as i64),
            }
        })
        .collect();
    debug!("count_by: {} -> {} categories", column, counts.len());
    Some(CategorySeries {
        column: column.to_string(),
        title: title.to_string(),
        counts,
    })
}
