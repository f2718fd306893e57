//! Habit completion and statistics engine.
//!
//! Pure functions over a habit's schedule and completion timestamps:
//! - Whether a completion is allowed for a date
//! - Whether a habit counts as completed on a date
//! - Streak figures
//! - Per-habit statistics and today's completion percentage
//! - Derived list and dashboard state

pub mod completion;
pub mod stats;
pub mod streak;
pub mod view;

pub use completion::{can_complete_on, ensure_completable, is_completed_on};
pub use stats::{completion_percentage, compute_stats, HabitStats};
pub use streak::{current_run, longest_run, streak};
pub use view::{habit_views, Dashboard, HabitView};
