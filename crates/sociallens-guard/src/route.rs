//! The application's routes and their paths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GuardError;

/// Every page the client can show.
///
/// Serialized as its path string (`"/admin/login"`), which is also how it
/// appears in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Route {
    Feed,
    Profile,
    Explore,
    Messages,
    Create,
    Reels,
    Login,
    Signup,
    AdminLogin,
    Admin,
    NotFound,
}

impl Route {
    /// All routes, in router order.
    pub const ALL: [Route; 11] = [
        Route::Feed,
        Route::Profile,
        Route::Explore,
        Route::Messages,
        Route::Create,
        Route::Reels,
        Route::Login,
        Route::Signup,
        Route::AdminLogin,
        Route::Admin,
        Route::NotFound,
    ];

    /// The canonical path of this route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Feed => "/",
            Route::Profile => "/profile",
            Route::Explore => "/explore",
            Route::Messages => "/messages",
            Route::Create => "/create",
            Route::Reels => "/reels",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::AdminLogin => "/admin/login",
            Route::Admin => "/admin",
            Route::NotFound => "/404",
        }
    }

    /// Parses a path strictly: unknown paths are an error.
    ///
    /// Query strings, fragments and a trailing slash are ignored, so
    /// `/profile/?tab=posts#top` is [`Route::Profile`].
    pub fn parse(path: &str) -> Result<Route, GuardError> {
        let normalized = normalize(path);
        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .ok_or_else(|| GuardError::UnknownRoute(path.to_string()))
    }

    /// Resolves a path the way the router does: anything unknown is the
    /// catch-all [`Route::NotFound`].
    pub fn resolve(path: &str) -> Route {
        Route::parse(path).unwrap_or(Route::NotFound)
    }
}

/// Strips query, fragment and trailing slashes. An empty path is `/`.
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl TryFrom<String> for Route {
    type Error = GuardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Route::parse(&value)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path().to_string()
    }
}
