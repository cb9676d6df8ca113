//! Error types for the guard layer.

use crate::Route;

/// Errors that can occur while resolving or navigating routes.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// A path in configuration doesn't name any known route.
    #[error("unknown route path: {0}")]
    UnknownRoute(String),

    /// Redirects kept bouncing between guarded routes.
    /// Only a misconfigured route table can cause this.
    #[error("redirect loop starting at {from} after {hops} hops")]
    RedirectLoop { from: Route, hops: usize },

    /// A login path points at a route that itself requires sign-in, so
    /// signed-out users could never land anywhere.
    #[error("login path {0} requires sign-in")]
    GuardedLoginPath(Route),
}
