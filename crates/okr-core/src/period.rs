use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::OkrError;
use crate::types::MonthKey;
use crate::OkrResult;

/// The aggregation window selected in the UI. Transient; passed in fresh on
/// every computation and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PeriodSelection {
    /// January of the current year through the current month. Anchored to
    /// the wall-clock date, never parameterizable by year.
    Ytd,
    Monthly { year: i32, month: u32 },
    Quarterly { year: i32, quarter: u32 },
    Yearly { year: i32 },
}

impl PeriodSelection {
    /// Human label for the selected window, e.g. "March 2024" or "Q1 2024".
    pub fn label(&self) -> String {
        self.label_on(Local::now().date_naive())
    }

    /// Deterministic variant: `today` supplies the YTD year.
    pub fn label_on(&self, today: NaiveDate) -> String {
        match *self {
            PeriodSelection::Ytd => format!("YTD {}", today.year()),
            PeriodSelection::Monthly { year, month } => {
                format!("{} {}", month_name(month), year)
            }
            PeriodSelection::Quarterly { year, quarter } => format!("Q{quarter} {year}"),
            PeriodSelection::Yearly { year } => year.to_string(),
        }
    }
}

/// Resolve the ordered `YYYY-MM` keys for a period selection.
///
/// Only `ytd` consults the wall clock; for a deterministic window use
/// [`resolve_month_keys_on`].
pub fn resolve_month_keys(period: &PeriodSelection) -> OkrResult<Vec<MonthKey>> {
    resolve_month_keys_on(period, Local::now().date_naive())
}

/// Resolve month keys against an explicit `today`.
///
/// Whether a YTD window is meaningful for a given plan (the plan's data may
/// start after the current year) is a caller-side availability check; the
/// resolver always returns the calendar keys.
pub fn resolve_month_keys_on(
    period: &PeriodSelection,
    today: NaiveDate,
) -> OkrResult<Vec<MonthKey>> {
    match *period {
        PeriodSelection::Ytd => Ok((1..=today.month())
            .map(|m| month_key(today.year(), m))
            .collect()),
        PeriodSelection::Monthly { year, month } => {
            if !(1..=12).contains(&month) {
                return Err(OkrError::InvalidPeriod {
                    reason: format!("month {month} outside 1-12"),
                });
            }
            Ok(vec![month_key(year, month)])
        }
        PeriodSelection::Quarterly { year, quarter } => {
            if !(1..=4).contains(&quarter) {
                return Err(OkrError::InvalidPeriod {
                    reason: format!("quarter {quarter} outside 1-4"),
                });
            }
            let first = 3 * (quarter - 1) + 1;
            Ok((first..first + 3).map(|m| month_key(year, m)).collect())
        }
        PeriodSelection::Yearly { year } => Ok((1..=12).map(|m| month_key(year, m)).collect()),
    }
}

/// Format a month key with a zero-padded month, e.g. `2024-03`.
pub fn month_key(year: i32, month: u32) -> MonthKey {
    format!("{year}-{month:02}")
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_monthly_single_zero_padded_key() {
        let keys =
            resolve_month_keys_on(&PeriodSelection::Monthly { year: 2024, month: 3 }, date(2025, 1, 1))
                .unwrap();
        assert_eq!(keys, vec!["2024-03".to_string()]);
    }

    #[test]
    fn test_quarterly_windows() {
        let q1 = resolve_month_keys_on(
            &PeriodSelection::Quarterly { year: 2024, quarter: 1 },
            date(2025, 1, 1),
        )
        .unwrap();
        assert_eq!(q1, vec!["2024-01", "2024-02", "2024-03"]);

        let q4 = resolve_month_keys_on(
            &PeriodSelection::Quarterly { year: 2024, quarter: 4 },
            date(2025, 1, 1),
        )
        .unwrap();
        assert_eq!(q4, vec!["2024-10", "2024-11", "2024-12"]);
    }

    #[test]
    fn test_yearly_all_twelve_in_order() {
        let keys =
            resolve_month_keys_on(&PeriodSelection::Yearly { year: 2023 }, date(2025, 1, 1)).unwrap();
        assert_eq!(keys.len(), 12);
        assert_eq!(keys.first().unwrap(), "2023-01");
        assert_eq!(keys.last().unwrap(), "2023-12");
    }

    #[test]
    fn test_ytd_runs_through_current_month() {
        let keys = resolve_month_keys_on(&PeriodSelection::Ytd, date(2024, 5, 15)).unwrap();
        assert_eq!(
            keys,
            vec!["2024-01", "2024-02", "2024-03", "2024-04", "2024-05"]
        );
    }

    #[test]
    fn test_ytd_in_january_is_one_key() {
        let keys = resolve_month_keys_on(&PeriodSelection::Ytd, date(2026, 1, 2)).unwrap();
        assert_eq!(keys, vec!["2026-01"]);
    }

    #[test]
    fn test_out_of_range_parameters_fail() {
        let month = resolve_month_keys_on(
            &PeriodSelection::Monthly { year: 2024, month: 13 },
            date(2025, 1, 1),
        );
        assert!(matches!(month, Err(OkrError::InvalidPeriod { .. })));

        let quarter = resolve_month_keys_on(
            &PeriodSelection::Quarterly { year: 2024, quarter: 0 },
            date(2025, 1, 1),
        );
        assert!(matches!(quarter, Err(OkrError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_labels() {
        let today = date(2024, 6, 1);
        assert_eq!(PeriodSelection::Ytd.label_on(today), "YTD 2024");
        assert_eq!(
            PeriodSelection::Monthly { year: 2024, month: 3 }.label_on(today),
            "March 2024"
        );
        assert_eq!(
            PeriodSelection::Quarterly { year: 2024, quarter: 2 }.label_on(today),
            "Q2 2024"
        );
        assert_eq!(PeriodSelection::Yearly { year: 2024 }.label_on(today), "2024");
    }

    #[test]
    fn test_period_selection_decodes_tagged_json() {
        let period: PeriodSelection =
            serde_json::from_str(r#"{"type":"quarterly","year":2024,"quarter":2}"#).unwrap();
        assert_eq!(period, PeriodSelection::Quarterly { year: 2024, quarter: 2 });

        let ytd: PeriodSelection = serde_json::from_str(r#"{"type":"ytd"}"#).unwrap();
        assert_eq!(ytd, PeriodSelection::Ytd);
    }
}
