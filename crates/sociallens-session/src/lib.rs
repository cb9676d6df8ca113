//! Session tracking for SocialLens.
//!
//! This crate answers "who is signed in, and do we know yet?" for the
//! whole application:
//!
//! 1. **Authentication**: the hosted auth service behind the
//!    [`AuthService`] trait, delivering changes through an
//!    [`AuthSubscription`].
//! 2. **Session tracking**: [`SessionProvider`] turns auth events into
//!    [`Session`] snapshots on a watch channel.
//! 3. **Admin status**: an [`AdminPolicy`] (allow-list document or role
//!    claim) evaluated by the [`AdminWatcher`] whenever the account
//!    changes.
//!
//! # How it fits in the stack
//!
//! ```text
//! Guard layer (above)    <- reads Session + AdminStatus to pick a route
//!     |
//! Session layer (this crate)
//!     |
//! Identity layer (below) <- Identity, AccountId, Document
//! ```

mod admin;
mod auth;
mod error;
mod memory;
mod provider;
mod session;
mod store;

pub use admin::{
    AdminPolicy, AdminState, AdminStatus, AdminWatcher, AllowListPolicy, RoleClaimPolicy,
    DEFAULT_ADMIN_COLLECTION, DEFAULT_ADMIN_ROLE,
};
pub use auth::{AuthEvent, AuthService, AuthSubscription};
pub use error::SessionError;
pub use memory::{MemoryAuth, MemoryStore};
pub use provider::SessionProvider;
pub use session::Session;
pub use store::DocumentStore;
