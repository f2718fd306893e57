//! Error types for habitual.
//!
//! Every fallible operation in the crate returns [`HabitError`]. The
//! variants follow the three user-facing failure classes: missing identity,
//! local validation, and store failures.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    /// Create an empty set of errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any previous one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Turn a non-empty set into an error.
    ///
    /// # Errors
    ///
    /// Returns `HabitError::Validation` when any field failed.
    pub fn into_result(self) -> Result<(), HabitError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(HabitError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Errors that can occur in habitual.
#[derive(Error, Debug)]
pub enum HabitError {
    /// No authenticated user.
    #[error("Not signed in. Run `habitual auth login <user>` first")]
    Unauthenticated,

    /// The signed-in identity has not verified its email address.
    #[error("Email address for '{0}' is not verified")]
    EmailNotVerified(String),

    /// Form validation failed.
    #[error("Invalid habit: {0}")]
    Validation(ValidationErrors),

    /// A completion was attempted for a day other than today.
    #[error("Habits can only be marked as completed for the current day")]
    NotToday,

    /// Habit not found.
    #[error("Habit not found: {0}")]
    NotFound(String),

    /// Habit belongs to a different user.
    #[error("Habit {0} belongs to another user")]
    Forbidden(String),

    /// Storage failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to parse input or output data.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal or filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HabitError {
    /// Whether the error should be shown as a warning rather than a failure.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::NotToday)
    }
}

impl From<rusqlite::Error> for HabitError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<serde_json::Error> for HabitError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
