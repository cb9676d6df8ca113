//! The session provider: one task that turns auth events into [`Session`]
//! snapshots.
//!
//! # Concurrency note
//!
//! The provider task is the only writer. It owns the `watch::Sender`, so
//! no lock is involved: readers call [`SessionProvider::session`] or hold
//! a `watch::Receiver` and see the latest snapshot. Any number of guards
//! can read at once.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{AuthService, AuthSubscription, Session};

/// Keeps the current [`Session`] up to date for the lifetime of the app.
///
/// Created with [`start`](Self::start), which subscribes to the auth
/// service and spawns the update task. Tearing the provider down
/// (dropping it or calling [`shutdown`](Self::shutdown)) stops the task,
/// which drops the subscription and unregisters from the service.
#[derive(Debug)]
pub struct SessionProvider {
    state: watch::Receiver<Session>,
    task: JoinHandle<()>,
}

impl SessionProvider {
    /// Subscribes to `auth` and starts tracking its state.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<A: AuthService>(auth: &A) -> Self {
        let subscription = auth.subscribe();
        let (tx, rx) = watch::channel(Session::loading());
        let task = tokio::spawn(run(subscription, tx));
        debug!("session provider started");
        Self { state: rx, task }
    }

    /// The latest session snapshot.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// A receiver that observes every future snapshot.
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.state.clone()
    }

    /// Waits for the first auth event and returns the resolved session.
    ///
    /// If the auth service goes away before ever delivering an event, this
    /// returns the still-loading session instead of waiting forever.
    pub async fn resolved(&self) -> Session {
        let mut rx = self.state.clone();
        let resolved = rx
            .wait_for(|s| !s.is_loading())
            .await
            .map(|session| Session::clone(&session));
        resolved.unwrap_or_else(|_| rx.borrow().clone())
    }

    /// Stops the provider and waits until the subscription is released.
    pub async fn shutdown(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
        debug!("session provider stopped");
    }
}

impl Drop for SessionProvider {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// The provider task: apply every delivered event, in order.
async fn run(mut subscription: AuthSubscription, state: watch::Sender<Session>) {
    while let Some(event) = subscription.next().await {
        let first = state.borrow().is_loading();
        let uid = event.as_ref().map(|i| i.uid.clone());

        let mut changed = false;
        state.send_modify(|session| changed = session.apply(event));

        match uid {
            Some(uid) if changed || first => {
                info!(%uid, first, "session resolved: signed in");
            }
            None if changed || first => info!(first, "session resolved: signed out"),
            _ => debug!("auth event without account change"),
        }
    }

    // No retry: the session keeps its last known state.
    debug!("auth subscription closed");
}
