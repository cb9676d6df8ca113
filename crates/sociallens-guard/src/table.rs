//! The route table: which guard protects which route.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sociallens_session::{AdminStatus, Session};

use crate::{
    GuardDecision, GuardError, GuardPaths, Route, admin_login, admin_only, protected,
    redirect_if_authenticated,
};

/// The access rule for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Anyone, any time. No guard.
    Public,
    /// Signed-out visitors only ([`redirect_if_authenticated`]).
    GuestOnly,
    /// Signed-in accounts only ([`protected`]).
    Protected,
    /// Admin accounts only ([`admin_only`]).
    AdminOnly,
}

impl Access {
    /// Returns `true` if signed-out visitors can land on the route.
    pub fn admits_guests(self) -> bool {
        matches!(self, Self::Public | Self::GuestOnly)
    }
}

impl Route {
    /// The access rule the client ships with.
    pub fn default_access(self) -> Access {
        match self {
            Route::Login | Route::Signup | Route::AdminLogin => Access::GuestOnly,
            Route::Feed
            | Route::Profile
            | Route::Explore
            | Route::Messages
            | Route::Create
            | Route::Reels => Access::Protected,
            Route::Admin => Access::AdminOnly,
            Route::NotFound => Access::Public,
        }
    }
}

/// Redirect targets for the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableConfig {
    /// Used by guest-only and protected routes.
    #[serde(default)]
    pub user: GuardPaths,

    /// Used by admin-only routes.
    #[serde(default = "GuardPaths::admin")]
    pub admin: GuardPaths,
}

impl Default for RouteTableConfig {
    fn default() -> Self {
        Self {
            user: GuardPaths::default(),
            admin: GuardPaths::admin(),
        }
    }
}

/// Maps each route to its [`Access`] rule and evaluates the matching guard.
#[derive(Debug, Clone)]
pub struct RouteTable {
    access: HashMap<Route, Access>,
    config: RouteTableConfig,
}

impl RouteTable {
    /// Builds the default table with the given redirect targets.
    pub fn new(config: RouteTableConfig) -> Self {
        let access = Route::ALL
            .into_iter()
            .map(|route| (route, route.default_access()))
            .collect();
        Self { access, config }
    }

    /// Overrides the access rule of one route.
    pub fn with_access(mut self, route: Route, access: Access) -> Self {
        self.access.insert(route, access);
        self
    }

    /// The access rule of `route`.
    pub fn access(&self, route: Route) -> Access {
        self.access
            .get(&route)
            .copied()
            .unwrap_or_else(|| route.default_access())
    }

    /// The redirect targets in use.
    pub fn config(&self) -> &RouteTableConfig {
        &self.config
    }

    /// Checks that both login targets can be reached while signed out.
    ///
    /// # Errors
    /// [`GuardError::GuardedLoginPath`] if a login target is protected or
    /// admin-only.
    pub fn validate(&self) -> Result<(), GuardError> {
        for login in [self.config.user.login, self.config.admin.login] {
            if !self.access(login).admits_guests() {
                return Err(GuardError::GuardedLoginPath(login));
            }
        }
        Ok(())
    }

    /// Runs the guard for `route`.
    ///
    /// `admin` is only consulted for admin-only routes.
    pub fn evaluate(&self, route: Route, session: &Session, admin: AdminStatus) -> GuardDecision {
        match self.access(route) {
            Access::Public => GuardDecision::Render,
            Access::GuestOnly if route == self.config.admin.login => {
                admin_login(session, admin, &self.config.user, Route::Admin)
            }
            Access::GuestOnly => redirect_if_authenticated(session, &self.config.user),
            Access::Protected => protected(session, &self.config.user),
            Access::AdminOnly => admin_only(session, admin, &self.config.admin),
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(RouteTableConfig::default())
    }
}
