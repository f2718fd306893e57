use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Timestamp;
use crate::error::HabitError;

/// Category preselected in the habit form.
pub const DEFAULT_CATEGORY: &str = "Health";

/// Color used when a habit has none.
pub const DEFAULT_COLOR: &str = "#E50046";

/// Icon preselected in the habit form.
pub const DEFAULT_ICON: &str = "🏃";

/// Categories suggested by the habit form. Any other non-empty string is
/// accepted too.
pub const SUGGESTED_CATEGORIES: [&str; 7] = [
    "Health",
    "Fitness",
    "Productivity",
    "Learning",
    "Mindfulness",
    "Social",
    "Other",
];

/// Recurrence period of a habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Largest allowed target-days value for this frequency.
    #[must_use]
    pub const fn max_target_days(self) -> u32 {
        match self {
            Self::Daily | Self::Weekly => 7,
            Self::Monthly => 31,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(HabitError::Parse(format!(
                "Unknown frequency '{other}' (expected daily, weekly or monthly)"
            ))),
        }
    }
}

/// A tracked habit as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub frequency: Frequency,
    pub target_days: u32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub completed_dates: Vec<Timestamp>,
}

impl Habit {
    /// Display color, falling back to [`DEFAULT_COLOR`].
    #[must_use]
    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLOR)
    }

    /// Display icon, falling back to [`DEFAULT_ICON`].
    #[must_use]
    pub fn display_icon(&self) -> &str {
        self.icon
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_ICON)
    }
}

/// The create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub frequency: Frequency,
    pub target_days: u32,
    pub color: String,
    pub icon: String,
}

impl Default for HabitDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            frequency: Frequency::Daily,
            target_days: 1,
            color: DEFAULT_COLOR.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

impl HabitDraft {
    /// Start a draft with the given name and form defaults.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Description as stored: `None` when blank.
    #[must_use]
    pub fn stored_description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Partial field set for an update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub frequency: Option<Frequency>,
    pub target_days: Option<u32>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_archived: Option<bool>,
}

impl HabitUpdate {
    /// An update that only flips the archived flag.
    #[must_use]
    pub fn archived(is_archived: bool) -> Self {
        Self {
            is_archived: Some(is_archived),
            ..Self::default()
        }
    }

    /// Whether no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the update to `habit` in place.
    pub fn apply_to(&self, habit: &mut Habit) {
        if let Some(name) = &self.name {
            habit.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            habit.description.clone_from(description);
        }
        if let Some(category) = &self.category {
            habit.category.clone_from(category);
        }
        if let Some(frequency) = self.frequency {
            habit.frequency = frequency;
        }
        if let Some(target_days) = self.target_days {
            habit.target_days = target_days;
        }
        if let Some(color) = &self.color {
            habit.color = Some(color.clone());
        }
        if let Some(icon) = &self.icon {
            habit.icon = Some(icon.clone());
        }
        if let Some(is_archived) = self.is_archived {
            habit.is_archived = is_archived;
        }
    }
}
