//! Error taxonomy for store operations.
//!
//! Display strings are user-facing: consumers show them verbatim as form
//! messages, so they read like sentences rather than log lines.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("User already exists")]
    AlreadyExists,
    #[error("Only one regular user is allowed. Please contact admin.")]
    SingleUserLimitExceeded,
    #[error("Invalid admin credentials")]
    InvalidRoleCredentials,
    #[error("User not found")]
    NotFound,
    #[error("Invalid password")]
    InvalidCredentials,
    #[error("No user logged in")]
    Unauthenticated,
    #[error("Unauthorized")]
    Forbidden,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("credential hashing failed: {0}")]
    Credential(String),
}

impl AuthError {
    /// Machine-readable code for consumers that branch on the failure kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "already_exists",
            Self::SingleUserLimitExceeded => "single_user_limit_exceeded",
            Self::InvalidRoleCredentials => "invalid_role_credentials",
            Self::NotFound => "not_found",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::InvalidEmail => "invalid_email",
            Self::Credential(_) => "credential",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
