//! JSON output formatting for habitual.
//!
//! Keys are camelCase, matching the serialized habit model.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::auth::Identity;
use crate::engine::{current_run, streak, HabitStats, HabitView};
use crate::error::HabitError;
use crate::habits::Habit;
use crate::service::{CategorySummary, CompletionOutcome};

/// Format the habit list for a selected date as JSON
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habit_list_json(views: &[HabitView], selected: NaiveDate) -> Result<String, HabitError> {
    let output = json!({
        "date": selected,
        "count": views.len(),
        "items": views
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single habit as JSON, with its derived figures for `today`
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habit_json(habit: &Habit, today: NaiveDate) -> Result<String, HabitError> {
    let mut value = serde_json::to_value(habit)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("completedToday".to_string(), json!(habit.is_completed_on(today)));
        object.insert("streak".to_string(), json!(streak(habit).unwrap_or(0)));
        object.insert(
            "currentRun".to_string(),
            json!(current_run(&habit.completed_dates, today)),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Format the result of a completion request as JSON
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_completion_json(
    habit: &Habit,
    outcome: CompletionOutcome,
    date: NaiveDate,
) -> Result<String, HabitError> {
    let output = json!({
        "habitId": habit.id,
        "name": habit.name,
        "date": date,
        "outcome": outcome,
        "streak": streak(habit).unwrap_or(0)
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format per-habit statistics as JSON
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_stats_json(stats: &[HabitStats]) -> Result<String, HabitError> {
    let output = json!({
        "count": stats.len(),
        "items": stats
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the category list as JSON
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_categories_json(categories: &[CategorySummary]) -> Result<String, HabitError> {
    let output = json!({
        "count": categories.len(),
        "items": categories
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the signed-in identity as JSON
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_identity_json(identity: Option<&Identity>) -> Result<String, HabitError> {
    let output = json!({
        "signedIn": identity.is_some(),
        "identity": identity
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, HabitError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::Frequency;
    use chrono::DateTime;

    fn habit() -> Habit {
        Habit {
            id: "h1".to_string(),
            user_id: "u1".to_string(),
            name: "Walk".to_string(),
            description: None,
            category: "Health".to_string(),
            frequency: Frequency::Daily,
            target_days: 7,
            color: Some("#00AA00".to_string()),
            icon: None,
            is_archived: false,
            created_at: DateTime::parse_from_rfc3339("2024-01-01T09:00:00+00:00").unwrap(),
            updated_at: None,
            completed_dates: vec![
                DateTime::parse_from_rfc3339("2024-01-10T08:00:00+00:00").unwrap(),
                DateTime::parse_from_rfc3339("2024-01-10T20:00:00+00:00").unwrap(),
            ],
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_habit_list_json() {
        let views = crate::engine::habit_views(&[habit()], day());
        let result = format_habit_list_json(&views, day()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["date"], "2024-01-10");
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["completed"], true);
        assert_eq!(value["items"][0]["streak"], 2);
        assert_eq!(value["items"][0]["color"], "#00AA00");
    }

    #[test]
    fn test_habit_list_json_empty() {
        let result = format_habit_list_json(&[], day()).unwrap();
        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_habit_json_derived_fields() {
        let result = format_habit_json(&habit(), day()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["completedToday"], true);
        assert_eq!(value["streak"], 2);
        assert_eq!(value["currentRun"], 1);
        assert_eq!(value["targetDays"], 7);
    }

    #[test]
    fn test_completion_json() {
        let result =
            format_completion_json(&habit(), CompletionOutcome::AlreadyCompleted, day()).unwrap();
        assert!(result.contains("\"outcome\": \"already_completed\""));
        assert!(result.contains("\"habitId\": \"h1\""));
    }

    #[test]
    fn test_identity_json() {
        let signed_out = format_identity_json(None).unwrap();
        assert!(signed_out.contains("\"signedIn\": false"));

        let signed_in = format_identity_json(Some(&Identity::verified("alice"))).unwrap();
        assert!(signed_in.contains("\"userId\": \"alice\""));
        assert!(signed_in.contains("\"emailVerified\": true"));
    }
}
