//! The authentication collaborator and its subscription handle.
//!
//! SocialLens doesn't implement authentication. A hosted auth service
//! owns accounts and passwords, and tells us whenever the signed-in
//! account changes. [`AuthService`] is the seam: production code wraps the
//! real backend, tests and the demo use [`MemoryAuth`](crate::MemoryAuth).
//!
//! The service's "register a callback, get back an unsubscribe function"
//! API becomes an [`AuthSubscription`]: a channel of auth events plus a
//! disposer that runs when the subscription is dropped.

use std::fmt;
use std::future::Future;

use sociallens_identity::Identity;
use tokio::sync::mpsc;

use crate::SessionError;

/// One auth-state change: the newly signed-in identity, or `None` after
/// sign-out (or when nobody was signed in to begin with).
pub type AuthEvent = Option<Identity>;

/// A live registration with the auth service.
///
/// Yields every auth-state change in delivery order. Dropping it (or
/// calling [`unsubscribe`](Self::unsubscribe)) runs the disposer exactly
/// once, which is how the service learns to stop delivering.
pub struct AuthSubscription {
    events: mpsc::UnboundedReceiver<AuthEvent>,
    disposer: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl AuthSubscription {
    /// Wraps an event channel and the action that unregisters it.
    pub fn new(
        events: mpsc::UnboundedReceiver<AuthEvent>,
        disposer: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            events,
            disposer: Some(Box::new(disposer)),
        }
    }

    /// Waits for the next auth event.
    ///
    /// Returns `None` once the service stops delivering. There is no
    /// reconnect: a closed subscription stays closed.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        self.events.recv().await
    }

    /// Unregisters from the service. Same as dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(dispose) = self.disposer.take() {
            dispose();
        }
    }
}

impl fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSubscription")
            .field("disposed", &self.disposer.is_none())
            .finish_non_exhaustive()
    }
}

/// The hosted authentication service.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` so one service can be shared (behind an `Arc`)
/// between the session provider task and whatever triggers sign-in.
pub trait AuthService: Send + Sync + 'static {
    /// Registers for auth-state changes.
    ///
    /// The service must deliver at least one event after subscribing (the
    /// current state), asynchronously, and one per change after that.
    fn subscribe(&self) -> AuthSubscription;

    /// Signs in with email and password.
    ///
    /// On success the service also delivers the new identity to every
    /// subscriber.
    ///
    /// # Errors
    /// [`SessionError::AuthFailed`] if the credentials are rejected.
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Identity, SessionError>> + Send;

    /// Signs the current account out. Subscribers receive `None`.
    fn sign_out(&self) -> impl Future<Output = Result<(), SessionError>> + Send;
}
