//! Consumer-side admin hint cache.
//!
//! A small JSON file remembering that an admin was signed in, so a UI can
//! pre-seed its admin state after a reload. The store never reads it: the
//! hint is advisory and the store's in-memory session stays authoritative.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::account::Role;
use crate::events::{AuthEvent, Subscription};
use crate::store::SessionStore;

#[derive(Debug, thiserror::Error)]
pub enum HintError {
    #[error("hint file io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("hint file encode error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct AdminHint {
    email: String,
}

#[derive(Debug, Clone)]
pub struct AdminHintCache {
    path: PathBuf,
    admin_email: String,
}

impl AdminHintCache {
    pub fn new(path: impl Into<PathBuf>, admin_email: impl Into<String>) -> Self {
        Self { path: path.into(), admin_email: admin_email.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the cached email is the configured admin. Missing or
    /// unreadable files count as no hint.
    #[must_use]
    pub fn is_admin_hinted(&self) -> bool {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return false;
        };
        match serde_json::from_str::<AdminHint>(&raw) {
            Ok(hint) => hint.email == self.admin_email,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt admin hint");
                false
            }
        }
    }

    pub fn remember(&self, email: &str) -> Result<(), HintError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec(&AdminHint { email: email.to_owned() })?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), HintError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Follow one lifecycle event: admin sign-ins are remembered, anything
    /// else clears the hint.
    pub fn apply(&self, event: &AuthEvent) -> Result<(), HintError> {
        match event.session() {
            Some(session) if session.role() == Role::Admin => self.remember(session.email()),
            _ => self.clear(),
        }
    }

    /// Keep the hint in step with `store` from now on.
    pub fn attach(self, store: &SessionStore) -> Subscription {
        store.subscribe(move |event| {
            if let Err(e) = self.apply(event) {
                tracing::warn!(path = %self.path.display(), error = %e, "admin hint update failed");
            }
        })
    }
}

#[cfg(test)]
#[path = "hint_test.rs"]
mod tests;
