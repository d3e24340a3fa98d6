//! Authentication collaborator
//!
//! The core only consumes a "who is calling, what role" fact; token issuance
//! belongs to the external authentication service. `StaticTokenAuth` is a
//! map-backed implementation for configuration-driven deployments and tests.

use bluesignal_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Authority,
}

/// Verified caller identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
}

/// Trait for the authentication collaborator
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to a verified identity
    fn authenticate(&self, token: &str) -> Result<Identity>;
}

/// Token-to-identity map
#[derive(Debug, Default, Clone)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token
    pub fn with_token(
        mut self,
        token: impl Into<String>,
        user_id: impl Into<String>,
        role: Role,
    ) -> Self {
        self.tokens.insert(
            token.into(),
            Identity {
                user_id: user_id.into(),
                role,
            },
        );
        self
    }
}

impl AuthService for StaticTokenAuth {
    fn authenticate(&self, token: &str) -> Result<Identity> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| Error::auth("invalid token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_token_resolves() {
        let auth = StaticTokenAuth::new().with_token("t-1", "alice", Role::Authority);
        let identity = auth.authenticate("t-1").unwrap();
        assert_eq!(identity.user_id, "alice");
        assert_eq!(identity.role, Role::Authority);
    }

    #[test]
    fn unknown_token_is_rejected() {
        let auth = StaticTokenAuth::new();
        assert!(auth.authenticate("nope").is_err());
    }
}
