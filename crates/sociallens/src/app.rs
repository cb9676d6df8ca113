//! `App` builder and the session-aware navigation facade.
//!
//! Ties the layers together: auth service -> session provider -> admin
//! watcher -> route table. There is no global state; whoever builds the
//! `App` owns it and hands out references.

use std::sync::Arc;

use sociallens_guard::{Access, GuardDecision, Navigation, Route, RouteTable};
use sociallens_identity::{AccountId, Identity};
use sociallens_session::{
    AdminPolicy, AdminStatus, AdminWatcher, AuthService, Session, SessionProvider,
};
use tracing::{debug, info};

use crate::{AppConfig, SocialLensError};

/// Builder for configuring and starting an [`App`].
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use sociallens::prelude::*;
///
/// # async fn demo() -> Result<(), SocialLensError> {
/// let auth = Arc::new(MemoryAuth::new());
/// let policy = Arc::new(RoleClaimPolicy::default());
/// let app = AppBuilder::new().build(auth, policy)?;
/// let nav = app.navigate("/admin")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AppBuilder {
    config: AppConfig,
    overrides: Vec<(Route, Access)>,
}

impl AppBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the access rule of one route.
    pub fn access(mut self, route: Route, access: Access) -> Self {
        self.overrides.push((route, access));
        self
    }

    /// Validates the route table and starts the session and admin tasks.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// [`SocialLensError::Guard`] if a login target requires sign-in.
    pub fn build<A: AuthService, P: AdminPolicy>(
        self,
        auth: Arc<A>,
        policy: Arc<P>,
    ) -> Result<App<A, P>, SocialLensError> {
        let routes = self
            .overrides
            .into_iter()
            .fold(RouteTable::new(self.config.routes), |table, (route, access)| {
                table.with_access(route, access)
            });
        routes.validate()?;

        let session = SessionProvider::start(auth.as_ref());
        let admin = AdminWatcher::start(Arc::clone(&policy), session.watch());
        info!("app started");

        Ok(App {
            auth,
            policy,
            session,
            admin,
            routes,
            max_redirects: self.config.max_redirects,
        })
    }
}

/// A running client core: live session, live admin status, and guarded
/// navigation over them.
pub struct App<A: AuthService, P: AdminPolicy> {
    pub(crate) auth: Arc<A>,
    pub(crate) policy: Arc<P>,
    session: SessionProvider,
    admin: AdminWatcher,
    routes: RouteTable,
    max_redirects: usize,
}

impl<A: AuthService, P: AdminPolicy> App<A, P> {
    /// The latest session snapshot.
    pub fn session(&self) -> Session {
        self.session.session()
    }

    /// Admin status for the latest session.
    pub fn admin_status(&self) -> AdminStatus {
        self.admin.status(&self.session.session())
    }

    /// The route table in use.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Runs the guard of one route against the current state.
    pub fn guard(&self, route: Route) -> GuardDecision {
        let session = self.session.session();
        let admin = self.admin.status(&session);
        self.routes.evaluate(route, &session, admin)
    }

    /// Navigates to `path`, following guard redirects.
    ///
    /// Session and admin status are read once, so every hop is decided
    /// on the same snapshot.
    ///
    /// # Errors
    /// [`SocialLensError::Guard`] on a redirect loop.
    pub fn navigate(&self, path: &str) -> Result<Navigation, SocialLensError> {
        let session = self.session.session();
        let admin = self.admin.status(&session);
        let nav = self
            .routes
            .navigate(path, &session, admin, self.max_redirects)?;
        debug!(path, view = ?nav.view, "navigation");
        Ok(nav)
    }

    /// Waits until the session has resolved and the admin status for its
    /// account is known, then returns both.
    pub async fn settled(&self) -> (Session, AdminStatus) {
        self.session.resolved().await;
        let status = self.admin.settled(&self.session.watch()).await;
        (self.session.session(), status)
    }

    /// Signs in and waits until the session shows the new account.
    ///
    /// # Errors
    /// [`SocialLensError::Session`] if the credentials are rejected.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, SocialLensError> {
        let identity = self.auth.sign_in_with_password(email, password).await?;
        self.wait_for_subject(Some(&identity.uid)).await;
        Ok(identity)
    }

    /// Signs out and waits until the session shows nobody signed in.
    ///
    /// # Errors
    /// [`SocialLensError::Session`] if the auth service refuses.
    pub async fn sign_out(&self) -> Result<(), SocialLensError> {
        self.auth.sign_out().await?;
        self.wait_for_subject(None).await;
        Ok(())
    }

    /// Stops the session and admin tasks and unregisters from the auth
    /// service.
    pub async fn shutdown(self) {
        self.admin.shutdown().await;
        self.session.shutdown().await;
        info!("app stopped");
    }

    /// Returns once the session's account is `subject`, or once the auth
    /// service stops delivering.
    pub(crate) async fn wait_for_subject(&self, subject: Option<&AccountId>) {
        let mut rx = self.session.watch();
        let _ = rx.wait_for(|s| !s.is_loading() && s.subject() == subject).await;
    }
}
