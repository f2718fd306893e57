//! Output formatting for habitual.
//!
//! This module provides formatters for displaying habits, statistics and
//! progress as colored text or JSON.

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::auth::Identity;
use crate::cli::args::OutputFormat;
use crate::engine::{HabitStats, HabitView};
use crate::error::HabitError;
use crate::habits::Habit;
use crate::service::{CategorySummary, CompletionOutcome, Progress};

pub use json::*;
pub use pretty::*;

/// Format the habit list for a selected date based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habit_list(
    views: &[HabitView],
    selected: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_list_pretty(views, selected)),
        OutputFormat::Json => format_habit_list_json(views, selected),
    }
}

/// Format a single habit based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habit(habit: &Habit, today: NaiveDate, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_pretty(habit, today)),
        OutputFormat::Json => format_habit_json(habit, today),
    }
}

/// Format a completion result based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_completion(
    habit: &Habit,
    outcome: CompletionOutcome,
    date: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_completion_pretty(habit, outcome)),
        OutputFormat::Json => format_completion_json(habit, outcome, date),
    }
}

/// Format statistics based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_stats(stats: &[HabitStats], format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => format_stats_json(stats),
    }
}

/// Format today's progress based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_progress(progress: &Progress, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_progress_pretty(progress)),
        OutputFormat::Json => to_json(progress),
    }
}

/// Format categories based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_categories(
    categories: &[CategorySummary],
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_categories_pretty(categories)),
        OutputFormat::Json => format_categories_json(categories),
    }
}

/// Format the signed-in identity based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_identity(identity: Option<&Identity>, format: OutputFormat) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_identity_pretty(identity)),
        OutputFormat::Json => format_identity_json(identity),
    }
}
