//! Identity types for SocialLens.
//!
//! This crate defines who a signed-in user is, as far as the rest of the
//! workspace cares:
//!
//! - **[`AccountId`]**: the backend-assigned uid.
//! - **[`Identity`]**: uid plus profile basics and server-issued role claims.
//! - **[`Document`]**: a schemaless record from the backend document store.
//!
//! ```text
//! Guard layer (above)     <- decides routes from Session + admin status
//!     |
//! Session layer           <- tracks the current Identity
//!     |
//! Identity layer (this crate)
//! ```

mod document;
mod error;
mod types;

pub use document::Document;
pub use error::IdentityError;
pub use types::{AccountId, Identity};
