//! Streak figures.
//!
//! The streak shown next to a habit is its lifetime completion count. A true
//! consecutive-day run is reported separately as [`current_run`] and never
//! replaces it.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::core::Timestamp;
use crate::habits::Habit;

/// Lifetime number of completion timestamps, `None` when there are none.
///
/// Two timestamps on the same calendar day count twice here even though the
/// day counts once for [`super::is_completed_on`].
#[must_use]
pub fn streak(habit: &Habit) -> Option<usize> {
    let count = habit.completed_dates.len();
    (count > 0).then_some(count)
}

/// Consecutive calendar days with a completion, walking back from `today`.
///
/// If today has no completion yet the run is counted from yesterday, so an
/// unfinished day does not break it.
#[must_use]
pub fn current_run(completions: &[Timestamp], today: NaiveDate) -> usize {
    let days: BTreeSet<NaiveDate> = completions.iter().map(Timestamp::date_naive).collect();

    let mut check = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut run = 0;
    while days.contains(&check) {
        run += 1;
        check -= Duration::days(1);
    }
    run
}

/// Longest run of consecutive calendar days ever recorded.
#[must_use]
pub fn longest_run(completions: &[Timestamp]) -> usize {
    let days: BTreeSet<NaiveDate> = completions.iter().map(Timestamp::date_naive).collect();

    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for day in days {
        run = match prev {
            Some(p) if (day - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }

    longest
}
