//! Command implementations for habitual.
//!
//! This module contains the implementation of all CLI commands.

mod add;
mod auth;
mod complete;
mod completions;
mod stats;

pub use add::{add, edit};
pub use auth::auth;
pub use complete::complete;
pub use completions::{completions, generate_completions};
pub use stats::{categories, progress, stats};

use chrono::NaiveDate;

use crate::auth::IdentityProvider;
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::HabitDefaults;
use crate::core::{now, parse_date};
use crate::engine::habit_views;
use crate::error::HabitError;
use crate::output::{format_habit, format_habit_list, to_json};
use crate::service::{HabitService, ListFilter};
use crate::storage::HabitStore;

/// Resolve an optional date expression, defaulting to `today`.
pub(crate) fn resolve_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate, HabitError> {
    match input {
        None => Ok(today),
        Some(text) => parse_date(text, today)
            .ok_or_else(|| HabitError::Parse(format!("Unrecognized date '{text}'"))),
    }
}

/// Execute list command
///
/// # Errors
///
/// Returns an error if signed out, the date cannot be parsed, or the store fails.
pub fn list<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    args: ListArgs,
    defaults: &HabitDefaults,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let today = now().date_naive();
    let selected = resolve_date(args.date.as_deref(), today)?;

    let filter = ListFilter {
        category: args.category,
        include_archived: args.archived || defaults.show_archived,
        completed_on: args.completed.then_some(selected),
    };
    let habits = service.habits(filter)?;

    format_habit_list(&habit_views(&habits, selected), selected, format)
}

/// Execute show command
///
/// # Errors
///
/// Returns an error if signed out, the habit is missing or not owned, or the
/// store fails.
pub fn show<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    id: &str,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let habit = service.habit(id)?;
    format_habit(&habit, now().date_naive(), format)
}

/// Execute archive and unarchive commands
///
/// # Errors
///
/// Returns an error if signed out, the habit is missing or not owned, or the
/// store fails.
pub fn archive<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    id: &str,
    archived: bool,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let habit = service.set_archived(id, archived, &now())?;

    match format {
        OutputFormat::Json => to_json(&habit),
        OutputFormat::Pretty if archived => Ok(format!("Archived habit: {}", habit.name)),
        OutputFormat::Pretty => Ok(format!("Restored habit: {}", habit.name)),
    }
}

/// Execute delete command
///
/// Without `confirmed`, nothing is deleted.
///
/// # Errors
///
/// Returns an error if signed out, the habit is missing or not owned, or the
/// store fails.
pub fn delete<S: HabitStore, I: IdentityProvider>(
    service: &HabitService<S, I>,
    id: &str,
    confirmed: bool,
    format: OutputFormat,
) -> Result<String, HabitError> {
    if !confirmed {
        let habit = service.habit(id)?;
        return Ok(format!(
            "Habit '{}' was not deleted. Re-run with --yes to delete it and its {} completion(s).",
            habit.name,
            habit.completed_dates.len()
        ));
    }

    let habit = service.remove_habit(id)?;
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({ "deleted": habit.id, "name": habit.name })),
        OutputFormat::Pretty => Ok(format!("Deleted habit: {}", habit.name)),
    }
}
