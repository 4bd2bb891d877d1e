//! Session lifecycle events and the listener registry.
//!
//! DESIGN
//! ======
//! Listeners are either callbacks or unbounded channels, keyed by a
//! `Subscription` id. Broadcast snapshots the registry and releases the lock
//! before delivering, so a callback may subscribe, unsubscribe, or read the
//! store without deadlocking. Every listener registered at the moment of the
//! snapshot sees the event before `broadcast` returns; channel listeners see it
//! as an enqueued message.
//!
//! Channels whose receiver has been dropped are pruned lazily on the next
//! broadcast.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::session::Session;

// =============================================================================
// EVENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum AuthEvent {
    #[serde(rename = "signed-in")]
    SignedIn { session: Session },
    #[serde(rename = "signed-out")]
    SignedOut,
}

impl AuthEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignedIn { .. } => "signed-in",
            Self::SignedOut => "signed-out",
        }
    }

    /// Session carried by the event, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn { session } => Some(session),
            Self::SignedOut => None,
        }
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle returned by `subscribe`; pass it back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(Uuid);

impl Subscription {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

type Callback = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

#[derive(Clone)]
enum Listener {
    Callback(Callback),
    Channel(mpsc::UnboundedSender<AuthEvent>),
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: Mutex<HashMap<Subscription, Listener>>,
}

impl ListenerRegistry {
    fn lock(&self) -> MutexGuard<'_, HashMap<Subscription, Listener>> {
        self.listeners
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn add_callback<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let sub = Subscription::new();
        self.lock().insert(sub, Listener::Callback(Arc::new(callback)));
        sub
    }

    pub fn add_channel(&self) -> (Subscription, mpsc::UnboundedReceiver<AuthEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sub = Subscription::new();
        self.lock().insert(sub, Listener::Channel(tx));
        (sub, rx)
    }

    pub fn remove(&self, sub: Subscription) -> bool {
        self.lock().remove(&sub).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Deliver `event` to every current listener. Returns how many received it.
    pub fn broadcast(&self, event: &AuthEvent) -> usize {
        let snapshot = self
            .lock()
            .iter()
            .map(|(sub, listener)| (*sub, listener.clone()))
            .collect::<Vec<_>>();

        let mut delivered = 0;
        let mut closed = Vec::new();
        for (sub, listener) in snapshot {
            match listener {
                Listener::Callback(callback) => {
                    callback(event);
                    delivered += 1;
                }
                Listener::Channel(tx) => {
                    if tx.send(event.clone()).is_ok() {
                        delivered += 1;
                    } else {
                        closed.push(sub);
                    }
                }
            }
        }

        if !closed.is_empty() {
            let mut listeners = self.lock();
            for sub in &closed {
                listeners.remove(sub);
            }
            tracing::debug!(pruned = closed.len(), "dropped closed event channels");
        }

        delivered
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
