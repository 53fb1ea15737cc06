//! User identity seam.
//!
//! Authentication itself is an external collaborator; the core only needs
//! an opaque user identifier to address the ledger and the generators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplies the current user's identity, if any.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

/// Identity provider backed by a fixed user id.
#[derive(Debug, Clone)]
pub struct StaticIdentity(UserId);

impl StaticIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(UserId::new(id))
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        Some(self.0.clone())
    }
}

/// Identity provider for a signed-out session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedOut;

impl IdentityProvider for SignedOut {
    fn current_user(&self) -> Option<UserId> {
        None
    }
}
