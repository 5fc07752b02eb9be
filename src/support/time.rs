//! Calendar helpers for due-date arithmetic.

use chrono::{Days, Local, NaiveDate};

use super::errors::DomainError;

/// Move `date` earlier by `days` calendar days.
pub fn shift_earlier(date: NaiveDate, days: u32) -> Result<NaiveDate, DomainError> {
    date.checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| {
            DomainError::Validation(format!("cannot move {} back by {} days", date, days))
        })
}

/// Move `date` later by `days` calendar days.
pub fn shift_later(date: NaiveDate, days: u32) -> Result<NaiveDate, DomainError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| {
            DomainError::Validation(format!("cannot move {} forward by {} days", date, days))
        })
}

/// Whole days from `today` until `due` (negative when overdue).
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Local wall-clock date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Timestamp used to prefix domain notes, e.g. `2024-03-10 14:05:09`.
pub fn note_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
