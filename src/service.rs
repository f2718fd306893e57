//! Habit actions on behalf of the signed-in user.
//!
//! Each action resolves the identity first, then runs the synchronous checks
//! (validation, completion eligibility, ownership), and only then calls the
//! store. Store failures are logged and returned; nothing is retried.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::{require_identity, Identity, IdentityProvider};
use crate::core::Timestamp;
use crate::engine::{completion_percentage, compute_stats, ensure_completable, HabitStats};
use crate::error::HabitError;
use crate::habits::{validate_draft, validate_update, Habit, HabitDraft, HabitUpdate, SUGGESTED_CATEGORIES};
use crate::storage::{HabitQuery, HabitStore, Subscription};

/// Result of a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// A completion was recorded.
    Completed,
    /// The habit was already completed that day; nothing was stored.
    AlreadyCompleted,
}

/// Listing options. The owner always comes from the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub category: Option<String>,
    pub include_archived: bool,
    pub completed_on: Option<NaiveDate>,
}

impl ListFilter {
    fn into_query(self, owner: &str) -> HabitQuery {
        HabitQuery::for_owner(owner)
            .category(self.category)
            .include_archived(self.include_archived)
            .completed_on(self.completed_on)
    }
}

/// Today's progress across active habits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

/// A category and how many of the user's habits use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub name: String,
    pub habits: usize,
    pub suggested: bool,
}

/// The action layer between callers and a [`HabitStore`].
pub struct HabitService<S, I> {
    store: S,
    identity: I,
}

impl<S: HabitStore, I: IdentityProvider> HabitService<S, I> {
    pub const fn new(store: S, identity: I) -> Self {
        Self { store, identity }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The identity actions run as.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` or `EmailNotVerified`.
    pub fn identity(&self) -> Result<Identity, HabitError> {
        require_identity(&self.identity)
    }

    /// Create a habit from a filled-in form.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out, the form is invalid, or the store fails.
    pub fn add_habit(&self, draft: &HabitDraft, now: &Timestamp) -> Result<Habit, HabitError> {
        let identity = self.identity()?;
        validate_draft(draft)?;

        let habit = logged(self.store.create(&identity.user_id, draft, now), "create habit")?;
        tracing::info!(habit = %habit.id, name = %habit.name, "habit created");
        Ok(habit)
    }

    /// Apply a partial update and return the stored result.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out, the habit is missing or not owned, the
    /// resulting habit is invalid, or the store fails.
    pub fn edit_habit(
        &self,
        id: &str,
        update: &HabitUpdate,
        now: &Timestamp,
    ) -> Result<Habit, HabitError> {
        let identity = self.identity()?;
        let current = self.owned(&identity, id)?;
        validate_update(&current, update)?;

        if update.is_empty() {
            return Ok(current);
        }

        logged(self.store.update(id, update, now), "update habit")?;
        tracing::info!(habit = id, "habit updated");
        self.owned(&identity, id)
    }

    /// Archive or restore a habit.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out, the habit is missing or not owned, or
    /// the store fails.
    pub fn set_archived(&self, id: &str, archived: bool, now: &Timestamp) -> Result<Habit, HabitError> {
        self.edit_habit(id, &HabitUpdate::archived(archived), now)
    }

    /// Delete a habit and its completions.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out, the habit is missing or not owned, or
    /// the store fails.
    pub fn remove_habit(&self, id: &str) -> Result<Habit, HabitError> {
        let identity = self.identity()?;
        let habit = self.owned(&identity, id)?;

        logged(self.store.delete(id), "delete habit")?;
        tracing::info!(habit = id, "habit deleted");
        Ok(habit)
    }

    /// Mark a habit completed for `target`, recording `now`.
    ///
    /// Only today's date is accepted. A habit already completed that day is
    /// reported as [`CompletionOutcome::AlreadyCompleted`] without a write.
    ///
    /// # Errors
    ///
    /// Returns `NotToday` before touching the store when `target` is not
    /// today, and an error if signed out, the habit is missing or not owned,
    /// or the store fails.
    pub fn complete_habit(
        &self,
        id: &str,
        target: NaiveDate,
        now: &Timestamp,
    ) -> Result<CompletionOutcome, HabitError> {
        let identity = self.identity()?;
        ensure_completable(target, now)?;

        let habit = self.owned(&identity, id)?;
        if habit.is_completed_on(target) {
            tracing::debug!(habit = id, day = %target, "already completed");
            return Ok(CompletionOutcome::AlreadyCompleted);
        }

        let inserted = logged(self.store.append_completion(id, now), "record completion")?;
        if !inserted {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }

        tracing::info!(habit = id, day = %target, "habit completed");
        Ok(CompletionOutcome::Completed)
    }

    /// One habit owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out, the habit is missing or not owned, or
    /// the store fails.
    pub fn habit(&self, id: &str) -> Result<Habit, HabitError> {
        let identity = self.identity()?;
        self.owned(&identity, id)
    }

    /// The signed-in user's habits, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out or the store fails.
    pub fn habits(&self, filter: ListFilter) -> Result<Vec<Habit>, HabitError> {
        let identity = self.identity()?;
        logged(self.store.list(&filter.into_query(&identity.user_id)), "list habits")
    }

    /// Statistics for every habit the user owns, archived ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out or the store fails.
    pub fn stats(&self, now: &Timestamp) -> Result<Vec<HabitStats>, HabitError> {
        let habits = self.habits(ListFilter {
            include_archived: true,
            ..ListFilter::default()
        })?;
        Ok(compute_stats(&habits, now))
    }

    /// Completion progress of active habits on `today`, optionally limited
    /// to one category.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out or the store fails.
    pub fn progress(
        &self,
        today: NaiveDate,
        category: Option<String>,
    ) -> Result<Progress, HabitError> {
        let habits = self.habits(ListFilter {
            category: category.clone(),
            ..ListFilter::default()
        })?;
        Ok(Progress {
            date: today,
            category,
            completed: habits.iter().filter(|h| h.is_completed_on(today)).count(),
            total: habits.len(),
            percentage: completion_percentage(&habits, today),
        })
    }

    /// Suggested categories followed by any custom ones in use.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out or the store fails.
    pub fn categories(&self) -> Result<Vec<CategorySummary>, HabitError> {
        let habits = self.habits(ListFilter {
            include_archived: true,
            ..ListFilter::default()
        })?;

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for habit in &habits {
            *counts.entry(habit.category.as_str()).or_default() += 1;
        }

        let mut summaries: Vec<CategorySummary> = SUGGESTED_CATEGORIES
            .iter()
            .map(|name| CategorySummary {
                name: (*name).to_string(),
                habits: counts.remove(name).unwrap_or(0),
                suggested: true,
            })
            .collect();

        summaries.extend(counts.into_iter().map(|(name, habits)| CategorySummary {
            name: name.to_string(),
            habits,
            suggested: false,
        }));

        Ok(summaries)
    }

    /// Live snapshots of the signed-in user's habits.
    ///
    /// # Errors
    ///
    /// Returns an error if signed out or the store fails.
    pub fn subscribe(&self, filter: ListFilter) -> Result<Subscription, HabitError> {
        let identity = self.identity()?;
        logged(
            self.store.subscribe(filter.into_query(&identity.user_id)),
            "subscribe to habits",
        )
    }

    fn owned(&self, identity: &Identity, id: &str) -> Result<Habit, HabitError> {
        let habit = logged(self.store.get(id), "load habit")?
            .ok_or_else(|| HabitError::NotFound(id.to_string()))?;

        if habit.user_id != identity.user_id {
            return Err(HabitError::Forbidden(id.to_string()));
        }
        Ok(habit)
    }
}

fn logged<T>(result: Result<T, HabitError>, action: &str) -> Result<T, HabitError> {
    result.map_err(|e| {
        tracing::error!(error = %e, "failed to {action}");
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MockIdentityProvider, StaticIdentity};
    use crate::habits::Frequency;
    use crate::storage::MockHabitStore;
    use chrono::{DateTime, Duration};

    fn now() -> Timestamp {
        DateTime::parse_from_rfc3339("2024-01-10T15:00:00+02:00").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn signed_in() -> StaticIdentity {
        StaticIdentity(Some(Identity::verified("u1")))
    }

    fn habit(id: &str, owner: &str, completions: &[&str]) -> Habit {
        Habit {
            id: id.to_string(),
            user_id: owner.to_string(),
            name: format!("habit {id}"),
            description: None,
            category: "Health".to_string(),
            frequency: Frequency::Weekly,
            target_days: 3,
            color: None,
            icon: None,
            is_archived: false,
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+02:00").unwrap(),
            updated_at: None,
            completed_dates: completions
                .iter()
                .map(|c| DateTime::parse_from_rfc3339(c).unwrap())
                .collect(),
        }
    }

    fn store_with(habit: Habit) -> MockHabitStore {
        let mut store = MockHabitStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(habit.clone())));
        store
    }

    #[test]
    fn test_complete_yesterday_never_reaches_store() {
        // No expectations: any store call panics.
        let service = HabitService::new(MockHabitStore::new(), signed_in());
        let yesterday = today() - Duration::days(1);

        let result = service.complete_habit("h1", yesterday, &now());
        assert!(matches!(result, Err(HabitError::NotToday)));

        let tomorrow = today() + Duration::days(1);
        assert!(matches!(
            service.complete_habit("h1", tomorrow, &now()),
            Err(HabitError::NotToday)
        ));
    }

    #[test]
    fn test_signed_out_never_reaches_store() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_current().returning(|| None);
        let service = HabitService::new(MockHabitStore::new(), identity);

        assert!(matches!(
            service.complete_habit("h1", today(), &now()),
            Err(HabitError::Unauthenticated)
        ));
        assert!(matches!(
            service.add_habit(&HabitDraft::named("Walk"), &now()),
            Err(HabitError::Unauthenticated)
        ));
        assert!(matches!(
            service.habits(ListFilter::default()),
            Err(HabitError::Unauthenticated)
        ));
    }

    #[test]
    fn test_complete_today_appends() {
        let mut store = store_with(habit("h1", "u1", &[]));
        store
            .expect_append_completion()
            .withf(|id, at| id == "h1" && *at == now())
            .times(1)
            .returning(|_, _| Ok(true));

        let service = HabitService::new(store, signed_in());
        assert_eq!(
            service.complete_habit("h1", today(), &now()).unwrap(),
            CompletionOutcome::Completed
        );
    }

    #[test]
    fn test_complete_twice_same_day_skips_write() {
        let store = store_with(habit("h1", "u1", &["2024-01-10T08:00:00+02:00"]));
        let service = HabitService::new(store, signed_in());

        assert_eq!(
            service.complete_habit("h1", today(), &now()).unwrap(),
            CompletionOutcome::AlreadyCompleted
        );
    }

    #[test]
    fn test_complete_store_reports_duplicate() {
        let mut store = store_with(habit("h1", "u1", &[]));
        store
            .expect_append_completion()
            .returning(|_, _| Ok(false));

        let service = HabitService::new(store, signed_in());
        assert_eq!(
            service.complete_habit("h1", today(), &now()).unwrap(),
            CompletionOutcome::AlreadyCompleted
        );
    }

    #[test]
    fn test_complete_other_users_habit_forbidden() {
        let store = store_with(habit("h1", "u2", &[]));
        let service = HabitService::new(store, signed_in());

        assert!(matches!(
            service.complete_habit("h1", today(), &now()),
            Err(HabitError::Forbidden(_))
        ));
    }

    #[test]
    fn test_complete_missing_habit() {
        let mut store = MockHabitStore::new();
        store.expect_get().returning(|_| Ok(None));
        let service = HabitService::new(store, signed_in());

        assert!(matches!(
            service.complete_habit("nope", today(), &now()),
            Err(HabitError::NotFound(_))
        ));
    }

    #[test]
    fn test_store_failure_is_returned() {
        let mut store = store_with(habit("h1", "u1", &[]));
        store
            .expect_append_completion()
            .returning(|_, _| Err(HabitError::Database("disk full".to_string())));
        let service = HabitService::new(store, signed_in());

        assert!(matches!(
            service.complete_habit("h1", today(), &now()),
            Err(HabitError::Database(_))
        ));
    }

    #[test]
    fn test_add_invalid_draft_never_reaches_store() {
        let service = HabitService::new(MockHabitStore::new(), signed_in());
        let draft = HabitDraft {
            frequency: Frequency::Weekly,
            target_days: 8,
            ..HabitDraft::named("Swim")
        };

        match service.add_habit(&draft, &now()) {
            Err(HabitError::Validation(errors)) => {
                assert_eq!(
                    errors.get("target_days"),
                    Some("Target days must be between 1 and 7")
                );
            },
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_add_creates_for_identity() {
        let mut store = MockHabitStore::new();
        store
            .expect_create()
            .withf(|owner, draft, _| owner == "u1" && draft.name == "Walk")
            .times(1)
            .returning(|owner, _, _| Ok(habit("h9", owner, &[])));

        let service = HabitService::new(store, signed_in());
        let created = service.add_habit(&HabitDraft::named("Walk"), &now()).unwrap();
        assert_eq!(created.user_id, "u1");
    }

    #[test]
    fn test_edit_validates_against_current_frequency() {
        // Current habit is weekly; 10 target days is out of range.
        let store = store_with(habit("h1", "u1", &[]));
        let service = HabitService::new(store, signed_in());
        let update = HabitUpdate {
            target_days: Some(10),
            ..HabitUpdate::default()
        };

        assert!(matches!(
            service.edit_habit("h1", &update, &now()),
            Err(HabitError::Validation(_))
        ));
    }

    #[test]
    fn test_archive_updates_flag() {
        let mut store = store_with(habit("h1", "u1", &[]));
        store
            .expect_update()
            .withf(|id, update, _| id == "h1" && update.is_archived == Some(true))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = HabitService::new(store, signed_in());
        service.set_archived("h1", true, &now()).unwrap();
    }

    #[test]
    fn test_remove_checks_owner() {
        let store = store_with(habit("h1", "u2", &[]));
        let service = HabitService::new(store, signed_in());
        assert!(matches!(
            service.remove_habit("h1"),
            Err(HabitError::Forbidden(_))
        ));
    }

    #[test]
    fn test_list_scopes_query_to_identity() {
        let mut store = MockHabitStore::new();
        store
            .expect_list()
            .withf(|q| q.owner == "u1" && q.category.as_deref() == Some("Fitness") && !q.include_archived)
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = HabitService::new(store, signed_in());
        let filter = ListFilter {
            category: Some("Fitness".to_string()),
            ..ListFilter::default()
        };
        assert!(service.habits(filter).unwrap().is_empty());
    }

    #[test]
    fn test_progress() {
        let mut store = MockHabitStore::new();
        store.expect_list().returning(|_| {
            Ok(vec![
                habit("a", "u1", &["2024-01-10T08:00:00+02:00"]),
                habit("b", "u1", &["2024-01-09T08:00:00+02:00"]),
                habit("c", "u1", &[]),
            ])
        });

        let service = HabitService::new(store, signed_in());
        let progress = service.progress(today(), None).unwrap();
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.percentage, 33);
    }

    #[test]
    fn test_progress_scopes_query_to_category() {
        let mut store = MockHabitStore::new();
        store
            .expect_list()
            .withf(|q| q.category.as_deref() == Some("Fitness") && !q.include_archived)
            .times(1)
            .returning(|_| Ok(vec![habit("a", "u1", &["2024-01-10T08:00:00+02:00"])]));

        let service = HabitService::new(store, signed_in());
        let progress = service
            .progress(today(), Some("Fitness".to_string()))
            .unwrap();
        assert_eq!(progress.category.as_deref(), Some("Fitness"));
        assert_eq!(progress.percentage, 100);
    }

    #[test]
    fn test_stats_cover_archived_habits() {
        let mut store = MockHabitStore::new();
        store
            .expect_list()
            .withf(|q| q.include_archived)
            .times(1)
            .returning(|_| {
                let mut archived = habit("a", "u1", &[]);
                archived.is_archived = true;
                Ok(vec![archived, habit("b", "u1", &[])])
            });

        let service = HabitService::new(store, signed_in());
        assert_eq!(service.stats(&now()).unwrap().len(), 2);
    }

    #[test]
    fn test_categories_lists_suggested_then_custom() {
        let mut store = MockHabitStore::new();
        store.expect_list().returning(|_| {
            let mut custom = habit("b", "u1", &[]);
            custom.category = "Music".to_string();
            Ok(vec![habit("a", "u1", &[]), custom])
        });

        let service = HabitService::new(store, signed_in());
        let categories = service.categories().unwrap();

        assert_eq!(categories.len(), SUGGESTED_CATEGORIES.len() + 1);
        assert_eq!(categories[0].name, "Health");
        assert_eq!(categories[0].habits, 1);
        let last = categories.last().unwrap();
        assert_eq!(last.name, "Music");
        assert!(!last.suggested);
    }
}
