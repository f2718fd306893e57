//! Habit form validation.
//!
//! Validation runs locally before any store call and reports every failing
//! field at once.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{Frequency, Habit, HabitDraft, HabitUpdate};
use crate::error::{HabitError, ValidationErrors};

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$")
        .unwrap_or_else(|e| panic!("Invalid color regex: {e}"))
});

/// Validate a create/edit form.
///
/// # Errors
///
/// Returns `HabitError::Validation` listing every invalid field.
pub fn validate_draft(draft: &HabitDraft) -> Result<(), HabitError> {
    let mut errors = ValidationErrors::new();

    check_name(&draft.name, &mut errors);
    check_target_days(draft.frequency, draft.target_days, &mut errors);
    check_category(&draft.category, &mut errors);
    check_color(&draft.color, &mut errors);

    errors.into_result()
}

/// Validate a partial update against the habit it will be applied to.
///
/// Target days are checked against the frequency the habit will have after
/// the update, so switching monthly → weekly with 20 target days fails.
///
/// # Errors
///
/// Returns `HabitError::Validation` listing every invalid field.
pub fn validate_update(current: &Habit, update: &HabitUpdate) -> Result<(), HabitError> {
    let mut errors = ValidationErrors::new();

    if let Some(name) = &update.name {
        check_name(name, &mut errors);
    }
    if update.frequency.is_some() || update.target_days.is_some() {
        let frequency = update.frequency.unwrap_or(current.frequency);
        let target_days = update.target_days.unwrap_or(current.target_days);
        check_target_days(frequency, target_days, &mut errors);
    }
    if let Some(category) = &update.category {
        check_category(category, &mut errors);
    }
    if let Some(color) = &update.color {
        check_color(color, &mut errors);
    }

    errors.into_result()
}

fn check_name(name: &str, errors: &mut ValidationErrors) {
    if name.trim().is_empty() {
        errors.add("name", "Habit name is required");
    }
}

fn check_target_days(frequency: Frequency, target_days: u32, errors: &mut ValidationErrors) {
    let max = frequency.max_target_days();
    if !(1..=max).contains(&target_days) {
        errors.add("target_days", format!("Target days must be between 1 and {max}"));
    }
}

fn check_category(category: &str, errors: &mut ValidationErrors) {
    if category.trim().is_empty() {
        errors.add("category", "Category is required");
    }
}

fn check_color(color: &str, errors: &mut ValidationErrors) {
    if !HEX_COLOR.is_match(color) {
        errors.add("color", "Color must be a hex value like #E50046");
    }
}
