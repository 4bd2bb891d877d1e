//! The session store: accounts, the current session, and listeners.
//!
//! DESIGN
//! ======
//! One `SessionStore` per process, constructed by the entry point and shared
//! as `Arc<SessionStore>`. Account table and current session live behind a
//! single mutex so every precondition check and the mutation it guards happen
//! under one lock. Events are broadcast after that lock is released, so
//! listeners may read the store while they run.
//!
//! Transitions are serialized by a second mutex held across the state change
//! and its broadcast, so listeners observe events in the same order the
//! session changed. A listener must not call `register`, `authenticate`, or
//! `deauthenticate` synchronously; that would deadlock on the transition lock.
//!
//! STATE MACHINE
//! =============
//! SignedOut --register/authenticate--> SignedIn(principal)
//! SignedIn  --register/authenticate--> SignedIn(new principal)
//! SignedIn  --deauthenticate--------> SignedOut
//!
//! A failed operation never changes the account table or the session.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::mpsc;

use crate::account::{Account, Metadata, Principal, Role, email_domain, normalize_email};
use crate::config::{HashCost, SeedAccount, StoreConfig};
use crate::credential;
use crate::error::AuthError;
use crate::events::{AuthEvent, ListenerRegistry, Subscription};
use crate::policy;
use crate::session::Session;

struct StoreInner {
    /// Accounts keyed by email.
    accounts: HashMap<String, Account>,
    current: Option<Session>,
}

impl StoreInner {
    fn user_exists(&self) -> bool {
        self.accounts.values().any(|a| a.role == Role::User)
    }
}

pub struct SessionStore {
    inner: Mutex<StoreInner>,
    /// Held from a state change until its event is delivered.
    transition: Mutex<()>,
    listeners: ListenerRegistry,
    admin_domain: String,
    hash_cost: HashCost,
}

impl SessionStore {
    /// Build a store and seed the configured accounts. Starts signed out.
    pub fn new(config: &StoreConfig) -> Result<Self, AuthError> {
        let demo = StoreConfig::demo_user();
        let mut accounts = HashMap::new();
        let mut seeds = vec![(&config.admin, Role::Admin)];
        if config.seed_demo_user {
            seeds.push((&demo, Role::User));
        }
        for (seed, role) in seeds {
            let account = seed_account(seed, role, config.hash_cost)?;
            if accounts.contains_key(&account.email) {
                tracing::error!(email = %account.email, "seed accounts share an email");
                return Err(AuthError::AlreadyExists);
            }
            accounts.insert(account.email.clone(), account);
        }

        tracing::info!(accounts = accounts.len(), "session store initialized");

        Ok(Self {
            inner: Mutex::new(StoreInner { accounts, current: None }),
            transition: Mutex::new(()),
            listeners: ListenerRegistry::default(),
            admin_domain: config.admin_domain.clone(),
            hash_cost: config.hash_cost,
        })
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn begin_transition(&self) -> MutexGuard<'_, ()> {
        self.transition
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn is_admin_email(&self, email: &str) -> bool {
        email_domain(email).is_some_and(|domain| domain.eq_ignore_ascii_case(&self.admin_domain))
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Create an account and sign it in.
    pub fn register(&self, email: &str, password: &str, role: Role, metadata: Metadata) -> Result<Session, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;

        let _transition = self.begin_transition();
        let session = {
            let mut inner = self.lock();
            if inner.accounts.contains_key(&email) {
                tracing::warn!(%email, "registration rejected: email taken");
                return Err(AuthError::AlreadyExists);
            }
            if role == Role::User && inner.user_exists() {
                tracing::warn!(%email, "registration rejected: user slot taken");
                return Err(AuthError::SingleUserLimitExceeded);
            }
            if role == Role::Admin && !self.is_admin_email(&email) {
                tracing::warn!(%email, "registration rejected: not an admin domain");
                return Err(AuthError::InvalidRoleCredentials);
            }

            let password_hash = credential::hash(password, self.hash_cost)?;
            let account = Account::new(email.clone(), password_hash, role, metadata);
            let session = Session::issue(account.principal());
            inner.accounts.insert(email, account);
            inner.current = Some(session.clone());
            session
        };

        tracing::info!(email = %session.principal.email, %role, "account registered");
        self.emit(&AuthEvent::SignedIn { session: session.clone() });
        Ok(session)
    }

    /// Sign in an existing account, replacing any current session.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;

        let _transition = self.begin_transition();
        let session = {
            let mut inner = self.lock();
            let Some(account) = inner.accounts.get(&email) else {
                tracing::warn!(%email, "sign-in rejected: unknown account");
                return Err(AuthError::NotFound);
            };
            if !credential::verify(password, &account.password_hash) {
                tracing::warn!(%email, "sign-in rejected: bad password");
                return Err(AuthError::InvalidCredentials);
            }
            let session = Session::issue(account.principal());
            inner.current = Some(session.clone());
            session
        };

        tracing::info!(%email, role = %session.principal.role, "signed in");
        self.emit(&AuthEvent::SignedIn { session: session.clone() });
        Ok(session)
    }

    /// Clear the current session. Emits `signed-out` even when already signed out.
    pub fn deauthenticate(&self) {
        let _transition = self.begin_transition();
        let previous = self.lock().current.take();
        match previous {
            Some(session) => tracing::info!(email = %session.principal.email, "signed out"),
            None => tracing::debug!("sign-out with no active session"),
        }
        self.emit(&AuthEvent::SignedOut);
    }

    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.lock().current.clone()
    }

    /// Whether the current session's principal has `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        policy::has_role(self.current_session().as_ref(), role)
    }

    // =========================================================================
    // ACCOUNT MAINTENANCE
    // =========================================================================

    /// Replace the signed-in account's password.
    pub fn update_password(&self, new_password: &str) -> Result<Principal, AuthError> {
        let mut inner = self.lock();
        let email = inner
            .current
            .as_ref()
            .map(|s| s.principal.email.clone())
            .ok_or(AuthError::Unauthenticated)?;
        let password_hash = credential::hash(new_password, self.hash_cost)?;
        let account = inner.accounts.get_mut(&email).ok_or(AuthError::NotFound)?;
        account.password_hash = password_hash;
        tracing::info!(%email, "password updated");
        Ok(account.principal())
    }

    /// Accept a reset request for a known email. No mail is sent.
    pub fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
        if !self.lock().accounts.contains_key(&email) {
            return Err(AuthError::NotFound);
        }
        tracing::info!(%email, "password reset requested; mail delivery is not wired");
        Ok(())
    }

    #[must_use]
    pub fn regular_user_exists(&self) -> bool {
        self.lock().user_exists()
    }

    /// All principals, sorted by email. Admin only.
    pub fn list_accounts(&self) -> Result<Vec<Principal>, AuthError> {
        let inner = self.lock();
        let current = inner.current.as_ref().ok_or(AuthError::Unauthenticated)?;
        if current.principal.role != Role::Admin {
            return Err(AuthError::Forbidden);
        }
        let mut principals = inner.accounts.values().map(Account::principal).collect::<Vec<_>>();
        principals.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(principals)
    }

    #[must_use]
    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }

    // =========================================================================
    // LISTENERS
    // =========================================================================

    /// Register a callback for lifecycle events. It runs synchronously inside
    /// the call that caused the transition, and may read the store but not
    /// start another transition.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        self.listeners.add_callback(listener)
    }

    /// Register a channel listener. Events are enqueued before the triggering
    /// call returns.
    pub fn subscribe_channel(&self) -> (Subscription, mpsc::UnboundedReceiver<AuthEvent>) {
        self.listeners.add_channel()
    }

    /// Returns false if `subscription` was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.listeners.remove(subscription)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&self, event: &AuthEvent) {
        let delivered = self.listeners.broadcast(event);
        tracing::debug!(event = event.name(), delivered, "auth event broadcast");
    }
}

fn seed_account(seed: &SeedAccount, role: Role, cost: HashCost) -> Result<Account, AuthError> {
    let email = normalize_email(&seed.email).ok_or(AuthError::InvalidEmail)?;
    let mut metadata = Metadata::new();
    metadata.insert("full_name".into(), seed.full_name.clone().into());
    let password_hash = credential::hash(&seed.password, cost)?;
    Ok(Account::new(email, password_hash, role, metadata))
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
