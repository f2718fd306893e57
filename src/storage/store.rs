//! The persistence boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Subscription;
use crate::core::Timestamp;
use crate::error::HabitError;
use crate::habits::{Habit, HabitDraft, HabitUpdate};

/// Server-side filter for habit listings.
///
/// Results are ordered newest first by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitQuery {
    pub owner: String,
    pub category: Option<String>,
    pub include_archived: bool,
    /// Only habits with a completion on this calendar day.
    pub completed_on: Option<NaiveDate>,
}

impl HabitQuery {
    /// Active habits of `owner` in every category.
    #[must_use]
    pub fn for_owner(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            category: None,
            include_archived: false,
            completed_on: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn include_archived(mut self, include: bool) -> Self {
        self.include_archived = include;
        self
    }

    #[must_use]
    pub const fn completed_on(mut self, date: Option<NaiveDate>) -> Self {
        self.completed_on = date;
        self
    }

    /// Whether `habit` satisfies this filter.
    #[must_use]
    pub fn matches(&self, habit: &Habit) -> bool {
        habit.user_id == self.owner
            && self.category.as_ref().map_or(true, |c| &habit.category == c)
            && (self.include_archived || !habit.is_archived)
            && self.completed_on.map_or(true, |d| habit.is_completed_on(d))
    }
}

/// Storage for habits and their completions.
///
/// Every mutation is a single atomic call. Implementations notify live
/// subscriptions after each committed mutation.
#[cfg_attr(test, mockall::automock)]
pub trait HabitStore {
    /// Persist a new habit for `owner`: not archived, no completions.
    fn create(&self, owner: &str, draft: &HabitDraft, now: &Timestamp) -> Result<Habit, HabitError>;

    /// Fetch one habit by id.
    fn get(&self, id: &str) -> Result<Option<Habit>, HabitError>;

    /// Habits matching `query`, newest first.
    fn list(&self, query: &HabitQuery) -> Result<Vec<Habit>, HabitError>;

    /// Apply a partial update and stamp `updated_at`.
    fn update(&self, id: &str, update: &HabitUpdate, now: &Timestamp) -> Result<(), HabitError>;

    /// Record a completion at `at`.
    ///
    /// Returns `false` when the habit already had a completion on that
    /// calendar day and nothing was stored.
    fn append_completion(&self, id: &str, at: &Timestamp) -> Result<bool, HabitError>;

    /// Remove a habit and its completions.
    fn delete(&self, id: &str) -> Result<(), HabitError>;

    /// Receive the full result set of `query` now and after every mutation.
    fn subscribe(&self, query: HabitQuery) -> Result<Subscription, HabitError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::Frequency;
    use chrono::DateTime;

    fn habit(owner: &str, category: &str, archived: bool) -> Habit {
        Habit {
            id: "h".to_string(),
            user_id: owner.to_string(),
            name: "n".to_string(),
            description: None,
            category: category.to_string(),
            frequency: Frequency::Daily,
            target_days: 1,
            color: None,
            icon: None,
            is_archived: archived,
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
            updated_at: None,
            completed_dates: vec![DateTime::parse_from_rfc3339("2024-01-05T10:00:00+00:00").unwrap()],
        }
    }

    #[test]
    fn test_query_matches() {
        let q = HabitQuery::for_owner("u1");
        assert!(q.matches(&habit("u1", "Health", false)));
        assert!(!q.matches(&habit("u2", "Health", false)));
        assert!(!q.matches(&habit("u1", "Health", true)));
        assert!(q.clone().include_archived(true).matches(&habit("u1", "Health", true)));

        let by_category = q.clone().category(Some("Fitness".to_string()));
        assert!(!by_category.matches(&habit("u1", "Health", false)));
        assert!(by_category.matches(&habit("u1", "Fitness", false)));

        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert!(q.clone().completed_on(Some(day)).matches(&habit("u1", "Health", false)));
        assert!(!q
            .completed_on(day.succ_opt())
            .matches(&habit("u1", "Health", false)));
    }
}
