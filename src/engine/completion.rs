//! Completion eligibility and per-date completion state.

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::core::Timestamp;
use crate::error::HabitError;
use crate::habits::Habit;

/// Whether a completion may be recorded for `target` at `now`.
///
/// Only the current calendar day in the caller's local time is eligible.
#[must_use]
pub fn can_complete_on<Tz: TimeZone>(target: NaiveDate, now: &DateTime<Tz>) -> bool {
    target == now.date_naive()
}

/// Like [`can_complete_on`], as a `Result` for callers that abort on failure.
///
/// # Errors
///
/// Returns `HabitError::NotToday` when `target` is not today.
pub fn ensure_completable<Tz: TimeZone>(
    target: NaiveDate,
    now: &DateTime<Tz>,
) -> Result<(), HabitError> {
    if can_complete_on(target, now) {
        Ok(())
    } else {
        Err(HabitError::NotToday)
    }
}

/// Whether any completion falls on `date`.
#[must_use]
pub fn is_completed_on(completions: &[Timestamp], date: NaiveDate) -> bool {
    completions.iter().any(|ts| ts.date_naive() == date)
}

impl Habit {
    /// Whether this habit counts as completed on `date`.
    #[must_use]
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        is_completed_on(&self.completed_dates, date)
    }
}
