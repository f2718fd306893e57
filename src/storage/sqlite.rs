//! `SQLite` implementation of [`HabitStore`].

use chrono::DateTime;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, HabitQuery, HabitStore, SnapshotHub, Subscription};
use crate::core::Timestamp;
use crate::error::HabitError;
use crate::habits::{Frequency, Habit, HabitDraft, HabitUpdate};

const HABIT_COLUMNS: &str = "id, user_id, name, description, category, frequency, target_days,
     color, icon, is_archived, created_at, updated_at";

/// Habit storage backed by the local database.
pub struct SqliteHabitStore {
    db: Database,
    hub: SnapshotHub,
}

impl SqliteHabitStore {
    /// Open the store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open() -> Result<Self, HabitError> {
        Ok(Self::with_database(Database::open()?))
    }

    /// Create a store with an existing database connection.
    #[must_use]
    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            hub: SnapshotHub::new(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.hub.len()
    }

    fn notify(&self) {
        self.hub.publish(|query| self.list(query));
    }

    fn load_completions(&self, habit: &mut Habit) -> Result<(), HabitError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare_cached(
                "SELECT completed_at FROM completions WHERE habit_id = ?1 ORDER BY id",
            )
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([&habit.id], |row| parse_timestamp(row, 0))
            .map_err(|e| HabitError::Database(format!("Failed to query completions: {e}")))?;

        habit.completed_dates = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| HabitError::Database(e.to_string()))?;
        Ok(())
    }

    fn require(&self, id: &str) -> Result<Habit, HabitError> {
        self.get(id)?
            .ok_or_else(|| HabitError::NotFound(id.to_string()))
    }
}

impl HabitStore for SqliteHabitStore {
    fn create(&self, owner: &str, draft: &HabitDraft, now: &Timestamp) -> Result<Habit, HabitError> {
        let habit = Habit {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: owner.to_string(),
            name: draft.name.trim().to_string(),
            description: draft.stored_description(),
            category: draft.category.trim().to_string(),
            frequency: draft.frequency,
            target_days: draft.target_days,
            color: Some(draft.color.clone()),
            icon: Some(draft.icon.clone()),
            is_archived: false,
            created_at: *now,
            updated_at: None,
            completed_dates: Vec::new(),
        };

        self.db
            .connection()
            .execute(
                r"INSERT INTO habits
                  (id, user_id, name, description, category, frequency, target_days,
                   color, icon, is_archived, created_at, created_epoch, updated_at)
                  VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?11, NULL)",
                params![
                    habit.id,
                    habit.user_id,
                    habit.name,
                    habit.description,
                    habit.category,
                    habit.frequency.as_str(),
                    habit.target_days,
                    habit.color,
                    habit.icon,
                    habit.created_at.to_rfc3339(),
                    habit.created_at.timestamp_millis(),
                ],
            )
            .map_err(|e| HabitError::Database(format!("Failed to insert habit: {e}")))?;

        tracing::debug!(habit = %habit.id, owner, "created habit");
        self.notify();
        Ok(habit)
    }

    fn get(&self, id: &str) -> Result<Option<Habit>, HabitError> {
        let conn = self.db.connection();
        let sql = format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1");

        let habit = conn
            .query_row(&sql, [id], row_to_habit)
            .optional()
            .map_err(|e| HabitError::Database(format!("Failed to query habit: {e}")))?;

        match habit {
            Some(mut habit) => {
                self.load_completions(&mut habit)?;
                Ok(Some(habit))
            },
            None => Ok(None),
        }
    }

    fn list(&self, query: &HabitQuery) -> Result<Vec<Habit>, HabitError> {
        let conn = self.db.connection();
        let sql = format!(
            r"SELECT {HABIT_COLUMNS} FROM habits h
              WHERE user_id = ?1
                AND (?2 IS NULL OR category = ?2)
                AND (?3 OR is_archived = 0)
                AND (?4 IS NULL OR EXISTS (
                    SELECT 1 FROM completions c WHERE c.habit_id = h.id AND c.day = ?4))
              ORDER BY created_epoch DESC, id"
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(
                params![
                    query.owner,
                    query.category,
                    query.include_archived,
                    query.completed_on.map(|d| d.format("%Y-%m-%d").to_string()),
                ],
                row_to_habit,
            )
            .map_err(|e| HabitError::Database(format!("Failed to query habits: {e}")))?;

        let mut habits = Vec::new();
        for row in rows {
            let mut habit = row.map_err(|e| HabitError::Database(e.to_string()))?;
            self.load_completions(&mut habit)?;
            habits.push(habit);
        }

        Ok(habits)
    }

    fn update(&self, id: &str, update: &HabitUpdate, now: &Timestamp) -> Result<(), HabitError> {
        let mut habit = self.require(id)?;
        update.apply_to(&mut habit);
        habit.updated_at = Some(*now);

        self.db
            .connection()
            .execute(
                r"UPDATE habits SET
                  name = ?1,
                  description = ?2,
                  category = ?3,
                  frequency = ?4,
                  target_days = ?5,
                  color = ?6,
                  icon = ?7,
                  is_archived = ?8,
                  updated_at = ?9
                  WHERE id = ?10",
                params![
                    habit.name,
                    habit.description,
                    habit.category,
                    habit.frequency.as_str(),
                    habit.target_days,
                    habit.color,
                    habit.icon,
                    habit.is_archived,
                    now.to_rfc3339(),
                    id,
                ],
            )
            .map_err(|e| HabitError::Database(format!("Failed to update habit: {e}")))?;

        tracing::debug!(habit = id, "updated habit");
        self.notify();
        Ok(())
    }

    fn append_completion(&self, id: &str, at: &Timestamp) -> Result<bool, HabitError> {
        self.require(id)?;

        let inserted = self
            .db
            .connection()
            .execute(
                "INSERT OR IGNORE INTO completions (habit_id, completed_at, day) VALUES (?1, ?2, ?3)",
                params![id, at.to_rfc3339(), at.date_naive().format("%Y-%m-%d").to_string()],
            )
            .map_err(|e| HabitError::Database(format!("Failed to record completion: {e}")))?;

        if inserted == 0 {
            tracing::debug!(habit = id, day = %at.date_naive(), "completion already recorded");
            return Ok(false);
        }

        tracing::debug!(habit = id, at = %at, "recorded completion");
        self.notify();
        Ok(true)
    }

    fn delete(&self, id: &str) -> Result<(), HabitError> {
        let deleted = self
            .db
            .connection()
            .execute("DELETE FROM habits WHERE id = ?1", [id])
            .map_err(|e| HabitError::Database(format!("Failed to delete habit: {e}")))?;

        if deleted == 0 {
            return Err(HabitError::NotFound(id.to_string()));
        }

        tracing::debug!(habit = id, "deleted habit");
        self.notify();
        Ok(())
    }

    fn subscribe(&self, query: HabitQuery) -> Result<Subscription, HabitError> {
        let initial = self.list(&query);
        Ok(self.hub.subscribe(query, initial))
    }
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_habit(row: &Row<'_>) -> rusqlite::Result<Habit> {
    let frequency: String = row.get(5)?;
    let frequency: Frequency = frequency
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    let updated_at: Option<String> = row.get(11)?;
    let updated_at = match updated_at {
        Some(raw) => Some(DateTime::parse_from_rfc3339(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e))
        })?),
        None => None,
    };

    Ok(Habit {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        frequency,
        target_days: row.get(6)?,
        color: row.get(7)?,
        icon: row.get(8)?,
        is_archived: row.get(9)?,
        created_at: parse_timestamp(row, 10)?,
        updated_at,
        completed_dates: Vec::new(),
    })
}
