//! Reference-week numbering.
//!
//! The reporting workflow numbers weeks from a fixed anchor date: week 1 is
//! the seven days starting on the anchor. The week shown in the summary is
//! the one containing the most recent date present in the data.

use chrono::NaiveDate;
use log::debug;

use crate::format::format_date;
use crate::CellValue;

/// Fixed label shown when no date at all is present in the data.
pub const DATE_UNAVAILABLE: &str = "date unavailable";

/// Fixed label shown when a maximum date exists but precedes the anchor.
pub const WEEK_UNAVAILABLE: &str = "semana no disponible";

/// Outcome of the week computation.
///
/// `week_index` is absent when every date cell is missing, and also when the
/// maximum date precedes the reference date: a week before the reporting
/// anchor carries no meaning, so it is withheld rather than clamped. In the
/// latter case `max_date` is still reported.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WeekSummary {
    pub week_index: Option<i64>,
    pub max_date: Option<NaiveDate>,
}

impl WeekSummary {
    pub fn max_date_formatted(&self) -> String {
        match self.max_date {
            Some(d) => format_date(d),
            None => "unavailable".to_string(),
        }
    }

    pub fn label(&self) -> String {
        match (self.week_index, self.max_date) {
            (Some(week), _) => format!("Semana {}", week),
            (None, Some(_)) => WEEK_UNAVAILABLE.to_string(),
            (None, None) => DATE_UNAVAILABLE.to_string(),
        }
    }
}

/// Computes the 1-based week index of the maximum non-missing date, counted
/// in elapsed whole days from `reference_date` (integer division by 7 plus
/// one).
pub fn reference_week(cells: &[CellValue], reference_date: NaiveDate) -> WeekSummary {
    let max_date = cells
        .iter()
        .filter_map(|c| match c {
            CellValue::Date(d) => Some(*d),
            _ => None,
        })
        .max();
    let res = match max_date {
        None => WeekSummary {
            week_index: None,
            max_date: None,
        },
        Some(d) => {
            let elapsed = (d - reference_date).num_days();
            let week_index = if elapsed >= 0 {
                Some(elapsed / 7 + 1)
            } else {
                None
            };
            WeekSummary {
                week_index,
                max_date: Some(d),
            }
        }
    };
    debug!(
        "reference_week: reference {:?} -> {:?}",
        reference_date, res
    );
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reference() -> NaiveDate {
        date(2022, 11, 1)
    }

    #[test]
    fn max_date_fourteen_days_out_is_week_three() {
        let cells = vec![
            CellValue::Date(date(2022, 11, 8)),
            CellValue::Date(date(2022, 11, 8)),
            CellValue::Date(date(2022, 11, 15)),
        ];
        let res = reference_week(&cells, reference());
        assert_eq!(res.week_index, Some(3));
        assert_eq!(res.max_date_formatted(), "15/11/2022");
        assert_eq!(res.label(), "Semana 3");
    }

    #[test]
    fn anchor_day_is_week_one() {
        let cells = vec![CellValue::Date(reference())];
        let res = reference_week(&cells, reference());
        assert_eq!(res.week_index, Some(1));
    }

    #[test]
    fn missing_cells_are_excluded_from_the_max() {
        let cells = vec![
            CellValue::Missing,
            CellValue::Date(date(2022, 11, 2)),
            CellValue::Text("not a date".to_string()),
        ];
        let res = reference_week(&cells, reference());
        assert_eq!(res.week_index, Some(1));
        assert_eq!(res.max_date, Some(date(2022, 11, 2)));
    }

    #[test]
    fn all_missing_yields_the_sentinel() {
        let cells = vec![CellValue::Missing, CellValue::Missing];
        let res = reference_week(&cells, reference());
        assert_eq!(res.week_index, None);
        assert_eq!(res.max_date, None);
        assert_eq!(res.max_date_formatted(), "unavailable");
        assert_eq!(res.label(), DATE_UNAVAILABLE);
    }

    // Data that entirely predates the anchor: the week index is withheld but
    // the maximum date is still reported.
    #[test]
    fn max_date_before_the_anchor_withholds_the_week() {
        let cells = vec![CellValue::Date(date(2022, 10, 25))];
        let res = reference_week(&cells, reference());
        assert_eq!(res.week_index, None);
        assert_eq!(res.max_date_formatted(), "25/10/2022");
        assert_eq!(res.label(), WEEK_UNAVAILABLE);
    }
}
