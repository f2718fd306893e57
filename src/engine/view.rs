//! Derived view state for the habit list and dashboard.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::completion::can_complete_on;
use super::stats::completion_percentage;
use super::streak::streak;
use crate::habits::Habit;

/// One row of the habit list, derived for a selected date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitView {
    pub id: String,
    pub name: String,
    /// Completed on the selected date.
    pub completed: bool,
    pub color: String,
    pub icon: String,
    pub category: String,
    /// Lifetime completion count, omitted when zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<usize>,
}

impl HabitView {
    #[must_use]
    pub fn from_habit(habit: &Habit, selected: NaiveDate) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            completed: habit.is_completed_on(selected),
            color: habit.display_color().to_string(),
            icon: habit.display_icon().to_string(),
            category: habit.category.clone(),
            streak: streak(habit),
        }
    }
}

/// Views for every habit, in input order.
#[must_use]
pub fn habit_views(habits: &[Habit], selected: NaiveDate) -> Vec<HabitView> {
    habits
        .iter()
        .map(|habit| HabitView::from_habit(habit, selected))
        .collect()
}

/// Dashboard state recomputed from full habit snapshots.
///
/// Each snapshot replaces the habit set entirely. The progress figure always
/// refers to `today`; the list refers to the selected date.
#[derive(Debug, Clone)]
pub struct Dashboard {
    today: NaiveDate,
    selected: NaiveDate,
    habits: Vec<Habit>,
    views: Vec<HabitView>,
    percentage: u8,
}

impl Dashboard {
    /// Empty dashboard with `today` selected.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today,
            selected: today,
            habits: Vec::new(),
            views: Vec::new(),
            percentage: 0,
        }
    }

    /// Replace the habit set with a new snapshot and recompute.
    pub fn apply_snapshot(&mut self, habits: Vec<Habit>) {
        self.habits = habits;
        self.recompute();
    }

    /// Change the selected date and recompute the list.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
        self.views = habit_views(&self.habits, self.selected);
    }

    /// Move the day boundary, e.g. after midnight passes.
    pub fn set_today(&mut self, today: NaiveDate) {
        if self.today != today {
            self.today = today;
            self.percentage = completion_percentage(&self.habits, self.today);
        }
    }

    fn recompute(&mut self) {
        self.views = habit_views(&self.habits, self.selected);
        self.percentage = completion_percentage(&self.habits, self.today);
    }

    /// Whether the selected date accepts completions at `now`.
    #[must_use]
    pub fn toggle_allowed<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        can_complete_on(self.selected, now)
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub const fn selected(&self) -> NaiveDate {
        self.selected
    }

    #[must_use]
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    #[must_use]
    pub fn views(&self) -> &[HabitView] {
        &self.views
    }

    /// Percentage of habits completed today.
    #[must_use]
    pub const fn percentage(&self) -> u8 {
        self.percentage
    }
}
