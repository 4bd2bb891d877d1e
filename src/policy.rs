//! Authorization checks shared by every consumer.
//!
//! Views ask here instead of branching on roles themselves.

use serde::Serialize;

use crate::account::Role;
use crate::session::Session;

#[must_use]
pub fn has_role(session: Option<&Session>, role: Role) -> bool {
    session.is_some_and(|s| s.role() == role)
}

/// What a view needs before it may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any signed-in principal.
    Authenticated,
    Role(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    SignInRequired,
    AdminRequired,
    RoleRequired(Role),
}

impl DenyReason {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::SignInRequired => "Please sign in to access this page.",
            Self::AdminRequired => "You need admin privileges to access this page.",
            Self::RoleRequired(_) => "You do not have access to this page.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied(DenyReason),
}

impl Access {
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

#[must_use]
pub fn check_access(session: Option<&Session>, requirement: Requirement) -> Access {
    match requirement {
        Requirement::Authenticated if session.is_some() => Access::Granted,
        Requirement::Authenticated => Access::Denied(DenyReason::SignInRequired),
        Requirement::Role(role) if has_role(session, role) => Access::Granted,
        Requirement::Role(_) if session.is_none() => Access::Denied(DenyReason::SignInRequired),
        Requirement::Role(Role::Admin) => Access::Denied(DenyReason::AdminRequired),
        Requirement::Role(role) => Access::Denied(DenyReason::RoleRequired(role)),
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod tests;
