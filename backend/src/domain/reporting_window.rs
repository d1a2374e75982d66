//! Date windows used by the dashboard queries.
//!
//! Both windows are computed from a caller-supplied "now" so the store only
//! ever sees plain timestamp bounds.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Half-open `[start, end)` interval covering one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Calendar year containing `now`
pub fn current_year(now: NaiveDateTime) -> YearWindow {
    let year = now.year();
    YearWindow {
        start: start_of_year(year),
        end: start_of_year(year + 1),
    }
}

/// Midnight of the date one calendar month before `now`'s date.
///
/// Day-of-month is clamped when the previous month is shorter, so
/// March 31 maps to the last day of February.
pub fn recent_since(now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date();
    let month_ago = today
        .checked_sub_months(Months::new(1))
        .unwrap_or(NaiveDate::MIN);
    month_ago.and_time(NaiveTime::MIN)
}

fn start_of_year(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap_or(NaiveDate::MAX)
        .and_time(NaiveTime::MIN)
}
