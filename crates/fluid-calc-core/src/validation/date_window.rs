//! Allowed range for the symptom onset date.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Policy constraining how recent a symptom onset date may be.
///
/// Every policy rejects dates after `today`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DateWindow {
    /// Date must fall inside one calendar year
    CalendarYear { year: i32 },
    /// Date must be no older than `days` before today
    TrailingDays { days: u32 },
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if date > today {
            return false;
        }
        match *self {
            DateWindow::CalendarYear { year } => date.year() == year,
            DateWindow::TrailingDays { days } => {
                match today.checked_sub_days(Days::new(u64::from(days))) {
                    Some(earliest) => date >= earliest,
                    None => true,
                }
            }
        }
    }

    /// Message shown under the date field when [`DateWindow::contains`] fails.
    pub fn violation_message(&self) -> String {
        match self {
            DateWindow::CalendarYear { year } => {
                format!("The date must be in {year} and cannot be later than today.")
            }
            DateWindow::TrailingDays { days } => format!(
                "The date must be within the last {days} days and cannot be later than today."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_year() {
        let window = DateWindow::CalendarYear { year: 2024 };
        let today = date(2024, 6, 15);

        assert!(window.contains(date(2024, 1, 1), today));
        assert!(window.contains(today, today));
        assert!(!window.contains(date(2024, 6, 16), today));
        assert!(!window.contains(date(2023, 12, 31), today));
    }

    #[test]
    fn test_calendar_year_after_year_ends() {
        let window = DateWindow::CalendarYear { year: 2024 };
        let today = date(2026, 10, 17);

        assert!(window.contains(date(2024, 12, 31), today));
        assert!(!window.contains(date(2026, 10, 1), today));
    }

    #[test]
    fn test_trailing_days() {
        let window = DateWindow::TrailingDays { days: 30 };
        let today = date(2026, 10, 17);

        assert!(window.contains(today, today));
        assert!(window.contains(date(2026, 9, 17), today));
        assert!(!window.contains(date(2026, 9, 16), today));
        assert!(!window.contains(date(2026, 10, 18), today));
    }

    #[test]
    fn test_messages_differ_by_policy() {
        let year = DateWindow::CalendarYear { year: 2024 }.violation_message();
        let trailing = DateWindow::TrailingDays { days: 30 }.violation_message();

        assert!(year.contains("2024"));
        assert!(trailing.contains("last 30 days"));
        assert_ne!(year, trailing);
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&DateWindow::TrailingDays { days: 30 }).unwrap();
        assert_eq!(json, r#"{"policy":"trailing_days","days":30}"#);

        let parsed: DateWindow =
            serde_json::from_str(r#"{"policy":"calendar_year","year":2024}"#).unwrap();
        assert_eq!(parsed, DateWindow::CalendarYear { year: 2024 });
    }
}
