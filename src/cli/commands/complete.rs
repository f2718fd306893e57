//! Complete command implementation.

use crate::auth::IdentityProvider;
use crate::cli::args::OutputFormat;
use crate::core::now;
use crate::error::HabitError;
use crate::output::format_completion;
use crate::service::HabitService;
use crate::storage::HabitStore;

use super::resolve_date;

/// Execute the complete command.
///
/// # Errors
///
/// Returns `HabitError::NotToday` when `date` is not today, and an error if
/// signed out, the habit is missing or not owned, or the store fails.
pub fn complete<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    id: &str,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let at = now();
    let target = resolve_date(date, at.date_naive())?;

    let outcome = service.complete_habit(id, target, &at)?;
    let habit = service.habit(id)?;

    format_completion(&habit, outcome, target, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Identity, StaticIdentity};
    use crate::habits::HabitDraft;
    use crate::storage::{Database, SqliteHabitStore};

    fn service() -> HabitService<SqliteHabitStore, StaticIdentity> {
        let store = SqliteHabitStore::with_database(Database::open_in_memory().unwrap());
        HabitService::new(store, StaticIdentity(Some(Identity::verified("u1"))))
    }

    #[test]
    fn test_complete_today_then_again() {
        let service = service();
        let habit = service.add_habit(&HabitDraft::named("Walk"), &now()).unwrap();

        let first = complete(&service, &habit.id, None, OutputFormat::Json).unwrap();
        assert!(first.contains("\"outcome\": \"completed\""));
        assert!(first.contains("\"streak\": 1"));

        let second = complete(&service, &habit.id, Some("today"), OutputFormat::Json).unwrap();
        assert!(second.contains("\"outcome\": \"already_completed\""));
        assert_eq!(service.habit(&habit.id).unwrap().completed_dates.len(), 1);
    }

    #[test]
    fn test_complete_yesterday_refused() {
        let service = service();
        let habit = service.add_habit(&HabitDraft::named("Walk"), &now()).unwrap();

        let result = complete(&service, &habit.id, Some("yesterday"), OutputFormat::Pretty);
        assert!(matches!(result, Err(HabitError::NotToday)));
        assert!(service.habit(&habit.id).unwrap().completed_dates.is_empty());
    }
}
