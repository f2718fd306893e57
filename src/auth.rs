//! Identity of the acting user.
//!
//! Operations never read ambient session state: the caller passes an
//! [`IdentityProvider`] and every store call is made on behalf of the
//! identity it returns.

use serde::{Deserialize, Serialize};

use crate::config::IdentityConfig;
use crate::error::HabitError;

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub email_verified: bool,
}

impl Identity {
    #[must_use]
    pub fn verified(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email_verified: true,
        }
    }
}

/// Source of the current identity.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider {
    /// The signed-in identity, or `None` when signed out.
    fn current(&self) -> Option<Identity>;

    /// Synchronous availability check.
    fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }
}

/// Resolve the identity an operation runs as.
///
/// # Errors
///
/// Returns `HabitError::Unauthenticated` when signed out and
/// `HabitError::EmailNotVerified` for an unverified identity.
pub fn require_identity<P: IdentityProvider + ?Sized>(provider: &P) -> Result<Identity, HabitError> {
    let identity = provider.current().ok_or(HabitError::Unauthenticated)?;
    if !identity.email_verified {
        return Err(HabitError::EmailNotVerified(identity.user_id));
    }
    Ok(identity)
}

/// Identity taken from the `identity` section of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigIdentity {
    identity: Option<Identity>,
}

impl ConfigIdentity {
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        let identity = config
            .user
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|user| Identity {
                user_id: user.to_string(),
                email_verified: config.email_verified,
            });
        Self { identity }
    }
}

impl IdentityProvider for ConfigIdentity {
    fn current(&self) -> Option<Identity> {
        self.identity.clone()
    }
}

/// A fixed identity, or none.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<Identity>);

impl IdentityProvider for StaticIdentity {
    fn current(&self) -> Option<Identity> {
        self.0.clone()
    }
}
