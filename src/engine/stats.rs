//! Per-habit statistics and today's completion percentage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::streak::{current_run, longest_run};
use crate::core::{start_of_day, Timestamp};
use crate::habits::Habit;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Statistics for one habit, computed at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub habit_id: String,
    pub name: String,
    /// Completions on or after the reference day (today 00:00).
    pub completed_count: usize,
    /// Whole days from creation to the reference day, rounded up.
    pub total_days: u64,
    /// `completed_count / total_days * 100`, or 0 when `total_days` is 0.
    pub completion_rate: f64,
    /// Consecutive days completed up to today.
    pub current_run: usize,
    /// Longest consecutive-day run on record.
    pub longest_run: usize,
}

impl HabitStats {
    /// Compute statistics for `habit` relative to `now`.
    #[must_use]
    pub fn calculate(habit: &Habit, now: &Timestamp) -> Self {
        let reference = start_of_day(now);

        let completed_count = habit
            .completed_dates
            .iter()
            .filter(|ts| **ts >= reference)
            .count();

        let total_days = days_tracked(&habit.created_at, &reference);
        let completion_rate = completion_rate(completed_count, total_days);

        Self {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
            completed_count,
            total_days,
            completion_rate,
            current_run: current_run(&habit.completed_dates, now.date_naive()),
            longest_run: longest_run(&habit.completed_dates),
        }
    }
}

/// Days between `created_at` and `reference`, rounded up; 0 when the habit
/// was created on or after the reference instant.
fn days_tracked(created_at: &Timestamp, reference: &Timestamp) -> u64 {
    let millis = (*reference - *created_at).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    // Positive, so the division and cast cannot go negative.
    ((millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY).unsigned_abs()
}

/// Percentage in `[0, 100]`; exactly 0 when nothing has been tracked.
///
/// Same-day duplicate rows can push the raw ratio past 100, so it is capped.
fn completion_rate(completed: usize, total_days: u64) -> f64 {
    if total_days == 0 {
        return 0.0;
    }
    (completed as f64 / total_days as f64 * 100.0).min(100.0)
}

/// Statistics for every habit, in input order.
#[must_use]
pub fn compute_stats(habits: &[Habit], now: &Timestamp) -> Vec<HabitStats> {
    habits
        .iter()
        .map(|habit| HabitStats::calculate(habit, now))
        .collect()
}

/// Share of habits completed on `today`, as a rounded percentage.
///
/// Returns 0 for an empty list.
#[must_use]
pub fn completion_percentage(habits: &[Habit], today: NaiveDate) -> u8 {
    if habits.is_empty() {
        return 0;
    }

    let completed = habits.iter().filter(|h| h.is_completed_on(today)).count();
    let pct = (completed as f64 / habits.len() as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}
