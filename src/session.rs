//! Sessions and session tokens.
//!
//! A session is the authenticated principal plus an opaque token. Tokens are
//! random per sign-in; nothing validates them later, they only let consumers
//! tell two sign-ins of the same account apart.

use std::fmt::Write;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::account::{Principal, Role};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// The currently authenticated principal and its token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub principal: Principal,
    pub access_token: String,
}

impl Session {
    pub(crate) fn issue(principal: Principal) -> Self {
        Self { principal, access_token: generate_token() }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.principal.role
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.principal.email
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
