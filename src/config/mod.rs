//! Configuration management for habitual.
//!
//! This module handles loading and saving configuration from `~/.habitual/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, HabitDefaults, IdentityConfig};
