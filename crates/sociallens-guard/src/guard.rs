//! The three route guards.
//!
//! Each guard is a pure function of the current [`Session`] (and, for
//! admin pages, the [`AdminStatus`]). None of them wait or fetch:
//! anything not known yet shows a placeholder, and the caller re-runs the
//! guard when the session changes.
//!
//! | guard | loading | signed out | signed in |
//! |---|---|---|---|
//! | [`protected`] | placeholder | redirect login | render |
//! | [`redirect_if_authenticated`] | placeholder | render | redirect home |
//! | [`admin_only`] | placeholder | redirect login | by admin status |

use serde::{Deserialize, Serialize};
use sociallens_session::{AdminStatus, Session};

use crate::Route;

/// What a guard tells the router to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the guarded page.
    Render,
    /// Show a loading placeholder. Not a redirect.
    Placeholder,
    /// Navigate elsewhere instead.
    Redirect(Route),
}

/// Where guards send users they turn away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardPaths {
    /// Destination for signed-out users.
    pub login: Route,
    /// Destination for users who are signed in but not allowed here.
    pub home: Route,
}

impl GuardPaths {
    /// Paths used around the admin panel: signed-out visitors go to the
    /// admin portal's own login page.
    pub fn admin() -> Self {
        Self {
            login: Route::AdminLogin,
            home: Route::Feed,
        }
    }
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            login: Route::Login,
            home: Route::Feed,
        }
    }
}

/// Pages that need a signed-in account.
pub fn protected(session: &Session, paths: &GuardPaths) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Placeholder
    } else if session.identity().is_none() {
        GuardDecision::Redirect(paths.login)
    } else {
        GuardDecision::Render
    }
}

/// Pages only for signed-out visitors (login, signup).
pub fn redirect_if_authenticated(session: &Session, paths: &GuardPaths) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Placeholder
    } else if session.identity().is_some() {
        GuardDecision::Redirect(paths.home)
    } else {
        GuardDecision::Render
    }
}

/// The admin portal's login page.
///
/// Guest-only like [`redirect_if_authenticated`], except that a signed-in
/// admin goes on to `admin_home`. Other signed-in accounts go to
/// `paths.home`, and the page waits while admin status is pending.
pub fn admin_login(
    session: &Session,
    admin: AdminStatus,
    paths: &GuardPaths,
    admin_home: Route,
) -> GuardDecision {
    match redirect_if_authenticated(session, paths) {
        GuardDecision::Redirect(home) => match admin {
            AdminStatus::Pending => GuardDecision::Placeholder,
            AdminStatus::Granted => GuardDecision::Redirect(admin_home),
            AdminStatus::Denied => GuardDecision::Redirect(home),
        },
        decision => decision,
    }
}

/// Pages that need an admin account.
///
/// `admin` must be the status for this same session, as produced by
/// [`AdminState::status_for`](sociallens_session::AdminState::status_for).
pub fn admin_only(session: &Session, admin: AdminStatus, paths: &GuardPaths) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Placeholder;
    }
    if session.identity().is_none() {
        return GuardDecision::Redirect(paths.login);
    }
    match admin {
        AdminStatus::Pending => GuardDecision::Placeholder,
        AdminStatus::Denied => GuardDecision::Redirect(paths.home),
        AdminStatus::Granted => GuardDecision::Render,
    }
}
