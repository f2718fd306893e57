//! habitual - A personal habit tracker for the terminal
//!
//! This crate provides habit tracking with per-day completion, streaks and
//! completion statistics, backed by a local `SQLite` store.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod habits;
pub mod output;
pub mod service;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::HabitError;
pub use habits::{Frequency, Habit};
pub use service::HabitService;
