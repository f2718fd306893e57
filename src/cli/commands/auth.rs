//! Auth command implementation.
//!
//! The signed-in identity lives in the `identity` section of the config file.

use crate::auth::{ConfigIdentity, IdentityProvider};
use crate::cli::args::{AuthCommands, OutputFormat};
use crate::config::{Config, IdentityConfig};
use crate::error::HabitError;
use crate::output::format_identity;

/// Execute auth subcommands against `config`, persisting changes with `save`.
///
/// # Errors
///
/// Returns an error if the user id is blank, verification is requested while
/// signed out, or saving fails.
pub fn auth<F>(
    cmd: AuthCommands,
    config: &mut Config,
    save: F,
    format: OutputFormat,
) -> Result<String, HabitError>
where
    F: FnOnce(&Config) -> Result<(), HabitError>,
{
    match cmd {
        AuthCommands::Login { user, unverified } => {
            let user = user.trim();
            if user.is_empty() {
                return Err(HabitError::Parse("User ID cannot be empty".to_string()));
            }
            config.identity = IdentityConfig {
                user: Some(user.to_string()),
                email_verified: !unverified,
            };
            save(config)?;
            tracing::info!(user, "signed in");
        },
        AuthCommands::Verify => {
            if !ConfigIdentity::new(&config.identity).is_signed_in() {
                return Err(HabitError::Unauthenticated);
            }
            config.identity.email_verified = true;
            save(config)?;
        },
        AuthCommands::Logout => {
            config.identity = IdentityConfig::default();
            save(config)?;
            tracing::info!("signed out");
        },
        AuthCommands::Whoami => {},
    }

    let identity = ConfigIdentity::new(&config.identity).current();
    format_identity(identity.as_ref(), format)
}
