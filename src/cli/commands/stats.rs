//! Statistics command implementations.
//!
//! Handles `stats`, `progress` and `categories`.

use crate::auth::IdentityProvider;
use crate::cli::args::OutputFormat;
use crate::core::now;
use crate::error::HabitError;
use crate::output::{format_categories, format_progress, format_stats};
use crate::service::HabitService;
use crate::storage::HabitStore;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if signed out or the store fails.
pub fn stats<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let stats = service.stats(&now())?;
    format_stats(&stats, format)
}

/// Execute the progress command, optionally for one category.
///
/// # Errors
///
/// Returns an error if signed out or the store fails.
pub fn progress<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    category: Option<String>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let progress = service.progress(now().date_naive(), category)?;
    format_progress(&progress, format)
}

/// Execute the categories command.
///
/// # Errors
///
/// Returns an error if signed out or the store fails.
pub fn categories<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let categories = service.categories()?;
    format_categories(&categories, format)
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
    fn test_stats_new_habit_has_zero_rate() {
        let service = service();
        service.add_habit(&HabitDraft::named("Walk"), &now()).unwrap();

        let output = stats(&service, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["totalDays"], 0);
        assert_eq!(value["items"][0]["completionRate"], 0.0);
    }

    #[test]
    fn test_progress_empty_is_zero() {
        let output = progress(&service(), None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["percentage"], 0);
        assert_eq!(value["total"], 0);
    }

    #[test]
    fn test_progress_all_completed() {
        let service = service();
        let walk = service.add_habit(&HabitDraft::named("Walk"), &now()).unwrap();
        service
            .complete_habit(&walk.id, now().date_naive(), &now())
            .unwrap();

        let output = progress(&service, None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["percentage"], 100);
    }

    #[test]
    fn test_progress_by_category() {
        let service = service();
        let run = service
            .add_habit(
                &HabitDraft {
                    category: "Fitness".to_string(),
                    ..HabitDraft::named("Run")
                },
                &now(),
            )
            .unwrap();
        service.add_habit(&HabitDraft::named("Walk"), &now()).unwrap();
        service.add_habit(&HabitDraft::named("Water"), &now()).unwrap();
        service
            .complete_habit(&run.id, now().date_naive(), &now())
            .unwrap();

        let output = progress(&service, Some("Fitness".to_string()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["category"], "Fitness");
        assert_eq!(value["total"], 1);
        assert_eq!(value["percentage"], 100);

        let output = progress(&service, Some("Health".to_string()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["percentage"], 0);

        let output = progress(&service, None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value.get("category").is_none());
        assert_eq!(value["percentage"], 33);
    }

    #[test]
    fn test_stats_include_archived_habits() {
        let service = service();
        let walk = service.add_habit(&HabitDraft::named("Walk"), &now()).unwrap();
        service.add_habit(&HabitDraft::named("Read"), &now()).unwrap();
        service.set_archived(&walk.id, true, &now()).unwrap();

        let output = stats(&service, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 2);
    }

    #[test]
    fn test_categories_pretty() {
        colored::control::set_override(false);
        let output = categories(&service(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("Categories (7)"));
        assert!(output.contains("Mindfulness"));
    }
}
