//! Core abstractions for habitual.
//!
//! This module provides the date utilities shared by the engine, the store
//! and the command layer.

mod datetime;

pub use datetime::{long_date, now, parse_date, start_of_day, Timestamp};
