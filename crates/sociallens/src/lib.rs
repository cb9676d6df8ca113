//! # SocialLens
//!
//! Session-aware navigation core for the SocialLens client.
//!
//! An [`App`] subscribes to the auth service, keeps the current session
//! and admin status up to date, and answers "what does this path show
//! right now?" through the route guards.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sociallens::prelude::*;
//!
//! # async fn run() -> Result<(), SocialLensError> {
//! let auth = Arc::new(MemoryAuth::new());
//! let store = MemoryStore::new();
//! let config = AppConfig::default();
//! let policy = Arc::new(config.admin.build(store));
//!
//! let app = AppBuilder::new().config(config).build(auth, policy)?;
//! app.settled().await;
//! assert_eq!(app.navigate("/")?.view, View::Page(Route::Login));
//! # Ok(())
//! # }
//! ```

mod app;
mod config;
mod error;
mod portal;
pub mod telemetry;

pub use app::{App, AppBuilder};
pub use config::{AdminPolicyConfig, AppConfig, ConfiguredPolicy};
pub use error::SocialLensError;

/// Everything needed to build and drive an [`App`].
pub mod prelude {
    pub use crate::{
        AdminPolicyConfig, App, AppBuilder, AppConfig, ConfiguredPolicy, SocialLensError,
    };
    pub use sociallens_guard::{
        Access, GuardDecision, GuardError, GuardPaths, Navigation, Route, RouteTable,
        RouteTableConfig, View,
    };
    pub use sociallens_identity::{AccountId, Document, Identity};
    pub use sociallens_session::{
        AdminPolicy, AdminStatus, AllowListPolicy, AuthService, DocumentStore, MemoryAuth,
        MemoryStore, RoleClaimPolicy, Session, SessionError,
    };
}
