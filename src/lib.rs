//! In-memory authentication and session store for the AlgoTrek front end.
//!
//! ARCHITECTURE
//! ============
//! `SessionStore` is the single authority for who is signed in. The entry
//! point builds it from `StoreConfig` and hands an `Arc` to every consumer.
//! Consumers read sessions, gate views through `policy`, and observe
//! sign-in/sign-out through `subscribe` or `subscribe_channel`.
//!
//! Nothing here talks to a network or a database; the only file touched is
//! the optional consumer-side admin hint.

pub mod account;
pub mod config;
pub mod credential;
pub mod error;
pub mod events;
pub mod hint;
pub mod policy;
pub mod session;
pub mod store;

pub use account::{Metadata, Principal, Role};
pub use config::{HashCost, StoreConfig};
pub use error::AuthError;
pub use events::{AuthEvent, Subscription};
pub use hint::AdminHintCache;
pub use policy::{Access, DenyReason, Requirement, check_access, has_role};
pub use session::Session;
pub use store::SessionStore;
