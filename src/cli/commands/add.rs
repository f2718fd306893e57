//! Habit form commands.
//!
//! This module implements `habitual add` and `habitual edit`.

use crate::auth::IdentityProvider;
use crate::cli::args::{AddArgs, EditArgs, OutputFormat};
use crate::config::HabitDefaults;
use crate::core::now;
use crate::error::HabitError;
use crate::habits::{HabitDraft, HabitUpdate};
use crate::output::{format_habit, to_json};
use crate::service::HabitService;
use crate::storage::HabitStore;

/// Build the create form from flags, filling gaps from config defaults.
fn draft_from_args(args: AddArgs, defaults: &HabitDefaults) -> HabitDraft {
    HabitDraft {
        name: args.name,
        description: args.description.unwrap_or_default(),
        category: args.category.unwrap_or_else(|| defaults.category.clone()),
        frequency: args.frequency.unwrap_or(defaults.frequency),
        target_days: args.target_days.unwrap_or(1),
        color: args.color.unwrap_or_else(|| defaults.color.clone()),
        icon: args.icon.unwrap_or_else(|| defaults.icon.clone()),
    }
}

fn update_from_args(args: &EditArgs) -> HabitUpdate {
    let description = if args.clear_description {
        Some(None)
    } else {
        args.description
            .as_deref()
            .map(|d| Some(d.trim().to_string()).filter(|d| !d.is_empty()))
    };

    HabitUpdate {
        name: args.name.as_deref().map(|n| n.trim().to_string()),
        description,
        category: args.category.as_deref().map(|c| c.trim().to_string()),
        frequency: args.frequency,
        target_days: args.target_days,
        color: args.color.clone(),
        icon: args.icon.clone(),
        is_archived: None,
    }
}

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if signed out, the form is invalid, or the store fails.
pub fn add<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    args: AddArgs,
    defaults: &HabitDefaults,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let draft = draft_from_args(args, defaults);
    let habit = service.add_habit(&draft, &now())?;

    match format {
        OutputFormat::Json => to_json(&habit),
        OutputFormat::Pretty => Ok(format!(
            "Created habit: {} {} (ID: {})",
            habit.display_icon(),
            habit.name,
            habit.id
        )),
    }
}

/// Execute the edit command.
///
/// # Errors
///
/// Returns an error if signed out, the habit is missing or not owned, the
/// result is invalid, or the store fails.
pub fn edit<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    args: &EditArgs,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let update = update_from_args(args);
    let at = now();
    let habit = service.edit_habit(&args.id, &update, &at)?;

    if update.is_empty() && format == OutputFormat::Pretty {
        return Ok(format!("No changes for habit: {}", habit.name));
    }
    format_habit(&habit, at.date_naive(), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Identity, StaticIdentity};
    use crate::habits::Frequency;
    use crate::storage::{Database, SqliteHabitStore};

    fn service() -> HabitService<SqliteHabitStore, StaticIdentity> {
        let store = SqliteHabitStore::with_database(Database::open_in_memory().unwrap());
        HabitService::new(store, StaticIdentity(Some(Identity::verified("u1"))))
    }

    fn add_args(name: &str) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            description: None,
            category: None,
            frequency: None,
            target_days: None,
            color: None,
            icon: None,
        }
    }

    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            name: None,
            description: None,
            clear_description: false,
            category: None,
            frequency: None,
            target_days: None,
            color: None,
            icon: None,
        }
    }

    #[test]
    fn test_draft_uses_config_defaults() {
        let defaults = HabitDefaults {
            category: "Mindfulness".to_string(),
            frequency: Frequency::Weekly,
            ..HabitDefaults::default()
        };
        let draft = draft_from_args(add_args("Meditate"), &defaults);

        assert_eq!(draft.category, "Mindfulness");
        assert_eq!(draft.frequency, Frequency::Weekly);
        assert_eq!(draft.target_days, 1);
        assert_eq!(draft.color, "#E50046");
    }

    #[test]
    fn test_add_json() {
        let service = service();
        let output = add(
            &service,
            add_args("Drink water"),
            &HabitDefaults::default(),
            OutputFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["name"], "Drink water");
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["isArchived"], false);
        assert_eq!(value["completedDates"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_add_invalid_color() {
        let service = service();
        let args = AddArgs {
            color: Some("red".to_string()),
            ..add_args("Walk")
        };
        let result = add(&service, args, &HabitDefaults::default(), OutputFormat::Pretty);
        assert!(matches!(result, Err(HabitError::Validation(_))));
    }

    #[test]
    fn test_edit_changes_only_given_fields() {
        let service = service();
        let habit = service
            .add_habit(&HabitDraft::named("Read"), &now())
            .unwrap();

        let args = EditArgs {
            name: Some("Read 20 pages".to_string()),
            description: Some("before bed".to_string()),
            ..edit_args(&habit.id)
        };
        edit(&service, &args, OutputFormat::Json).unwrap();

        let updated = service.habit(&habit.id).unwrap();
        assert_eq!(updated.name, "Read 20 pages");
        assert_eq!(updated.description.as_deref(), Some("before bed"));
        assert_eq!(updated.category, habit.category);
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn test_edit_clear_description() {
        let update = update_from_args(&EditArgs {
            clear_description: true,
            ..edit_args("h1")
        });
        assert_eq!(update.description, Some(None));
    }

    #[test]
    fn test_edit_nothing_to_change() {
        let service = service();
        let habit = service
            .add_habit(&HabitDraft::named("Read"), &now())
            .unwrap();

        let output = edit(&service, &edit_args(&habit.id), OutputFormat::Pretty).unwrap();
        assert!(output.contains("No changes"));
        assert!(service.habit(&habit.id).unwrap().updated_at.is_none());
    }
}
