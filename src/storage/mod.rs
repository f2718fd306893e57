//! Storage layer for habitual.
//!
//! This module provides:
//! - The [`HabitStore`] boundary every operation persists through
//! - A `SQLite` implementation of it
//! - Full-snapshot subscriptions for live views

mod database;
mod migrations;
mod sqlite;
mod store;
mod subscription;

pub use database::Database;
pub use sqlite::SqliteHabitStore;
#[cfg(test)]
pub use store::MockHabitStore;
pub use store::{HabitQuery, HabitStore};
pub use subscription::{SnapshotEvent, SnapshotHub, Subscription};
