//! Route guarding for SocialLens.
//!
//! Guards decide, from the current session, whether a page renders,
//! shows a placeholder, or redirects:
//!
//! - [`protected`], [`redirect_if_authenticated`], [`admin_only`]: the
//!   three guards, pure functions over [`Session`](sociallens_session::Session).
//!   [`admin_login`] is the guest-only variant used by the admin portal.
//! - [`RouteTable`]: which guard each [`Route`] uses, and navigation that
//!   follows redirects to a landing [`View`].

mod error;
mod guard;
mod navigation;
mod route;
mod table;

pub use error::GuardError;
pub use guard::{
    GuardDecision, GuardPaths, admin_login, admin_only, protected, redirect_if_authenticated,
};
pub use navigation::{DEFAULT_MAX_REDIRECTS, Navigation, View};
pub use route::Route;
pub use table::{Access, RouteTable, RouteTableConfig};
