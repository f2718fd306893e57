//! Habit data model.
//!
//! A habit is owned by one user and carries its completion history as a set
//! of timestamps. The store owns persistence; this module only describes the
//! shapes and validates user input.

mod types;
mod validation;

pub use types::{
    Frequency, Habit, HabitDraft, HabitUpdate, DEFAULT_CATEGORY, DEFAULT_COLOR, DEFAULT_ICON,
    SUGGESTED_CATEGORIES,
};
pub use validation::{validate_draft, validate_update};
