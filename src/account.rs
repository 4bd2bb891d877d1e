//! Accounts, roles, and the public principal view.
//!
//! DESIGN
//! ======
//! `Account` owns the credential hash and never leaves the store. Everything
//! handed to consumers goes through `Principal`, which is the serializable,
//! non-secret projection of an account.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form profile metadata (`full_name`, etc).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// =============================================================================
// ROLE
// =============================================================================

/// Access class gating which views and operations are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected 'admin' or 'user')")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}

// =============================================================================
// PRINCIPAL
// =============================================================================

/// Public view of an account, attached to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Principal {
    /// Display name from `full_name` metadata, falling back to the email's local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.metadata
            .get("full_name")
            .and_then(serde_json::Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| name_from_email(&self.email))
    }
}

// =============================================================================
// ACCOUNT
// =============================================================================

/// A registered identity. Held only inside the store.
#[derive(Debug, Clone)]
pub(crate) struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub metadata: Metadata,
}

impl Account {
    pub fn new(email: String, password_hash: String, role: Role, metadata: Metadata) -> Self {
        Self { id: Uuid::new_v4(), email, password_hash, role, metadata }
    }

    pub fn principal(&self) -> Principal {
        Principal { id: self.id, email: self.email.clone(), role: self.role, metadata: self.metadata.clone() }
    }
}

// =============================================================================
// EMAIL HELPERS
// =============================================================================

/// Trim and shape-check an email. Case is preserved.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    let parts = trimmed.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}

/// Domain part of an already-normalized email.
#[must_use]
pub fn email_domain(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain)
}

fn name_from_email(email: &str) -> &str {
    email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("user")
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
