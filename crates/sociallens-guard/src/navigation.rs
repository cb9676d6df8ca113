//! Navigation: run guards and follow their redirects to a landing page.

use sociallens_session::{AdminStatus, Session};
use tracing::debug;

use crate::{GuardDecision, GuardError, Route, RouteTable};

/// Redirect hops allowed before navigation gives up.
pub const DEFAULT_MAX_REDIRECTS: usize = 4;

/// What ends up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The page for this route is rendered.
    Page(Route),
    /// A placeholder is shown at this route until the session settles.
    Placeholder(Route),
}

impl View {
    /// The route the view is shown at.
    pub fn route(self) -> Route {
        match self {
            View::Page(route) | View::Placeholder(route) => route,
        }
    }
}

/// The result of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The route the path resolved to.
    pub requested: Route,
    /// Routes redirected through, in order. Empty if nothing redirected.
    pub redirects: Vec<Route>,
    /// Where navigation landed.
    pub view: View,
}

impl Navigation {
    /// `true` if at least one guard redirected.
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

impl RouteTable {
    /// Navigates to `path` for this session and admin status.
    ///
    /// Unknown paths land on [`Route::NotFound`].
    ///
    /// # Errors
    /// [`GuardError::RedirectLoop`] after `max_redirects` hops.
    pub fn navigate(
        &self,
        path: &str,
        session: &Session,
        admin: AdminStatus,
        max_redirects: usize,
    ) -> Result<Navigation, GuardError> {
        let requested = Route::resolve(path);
        let mut redirects = Vec::new();
        let mut current = requested;

        loop {
            match self.evaluate(current, session, admin) {
                GuardDecision::Render => {
                    debug!(%requested, landed = %current, "navigated");
                    return Ok(Navigation {
                        requested,
                        redirects,
                        view: View::Page(current),
                    });
                }
                GuardDecision::Placeholder => {
                    return Ok(Navigation {
                        requested,
                        redirects,
                        view: View::Placeholder(current),
                    });
                }
                GuardDecision::Redirect(next) => {
                    if redirects.len() >= max_redirects {
                        return Err(GuardError::RedirectLoop {
                            from: requested,
                            hops: redirects.len(),
                        });
                    }
                    debug!(from = %current, to = %next, "guard redirect");
                    redirects.push(next);
                    current = next;
                }
            }
        }
    }
}
