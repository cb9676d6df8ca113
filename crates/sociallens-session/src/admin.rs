//! Admin status: policies that decide it, and the watcher that keeps it
//! in step with the session.
//!
//! Whether an account is an admin is decided by the backend, never by
//! anything the client controls. Two policies are provided:
//!
//! - [`AllowListPolicy`]: the account's uid has a document in an admins
//!   collection.
//! - [`RoleClaimPolicy`]: the auth service issued an admin role claim.
//!
//! A lookup that fails counts as "not admin". The failure is logged and
//! goes no further.

use std::future::Future;
use std::sync::Arc;

use sociallens_identity::Identity;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{DocumentStore, Session};

/// Collection holding one document per admin account, keyed by uid.
pub const DEFAULT_ADMIN_COLLECTION: &str = "admins";

/// Role claim that marks an admin account.
pub const DEFAULT_ADMIN_ROLE: &str = "admin";

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// Decides whether an identity has admin rights.
///
/// Infallible by signature: implementations swallow their own errors and
/// answer `false`, so a guard can never be broken by a flaky backend.
pub trait AdminPolicy: Send + Sync + 'static {
    /// Returns `true` if `identity` is an admin.
    fn is_admin(&self, identity: &Identity) -> impl Future<Output = bool> + Send;
}

impl<P: AdminPolicy> AdminPolicy for Arc<P> {
    fn is_admin(&self, identity: &Identity) -> impl Future<Output = bool> + Send {
        (**self).is_admin(identity)
    }
}

/// Admin iff a document named after the account's uid exists in the
/// allow-list collection.
#[derive(Debug)]
pub struct AllowListPolicy<S> {
    store: S,
    collection: String,
}

impl<S: DocumentStore> AllowListPolicy<S> {
    /// Uses the [`DEFAULT_ADMIN_COLLECTION`].
    pub fn new(store: S) -> Self {
        Self::with_collection(store, DEFAULT_ADMIN_COLLECTION)
    }

    /// Uses a custom collection name.
    pub fn with_collection(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// The collection consulted for membership.
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl<S: DocumentStore> AdminPolicy for AllowListPolicy<S> {
    async fn is_admin(&self, identity: &Identity) -> bool {
        match self
            .store
            .get_document(&self.collection, identity.uid.as_str())
            .await
        {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!(
                    uid = %identity.uid,
                    collection = %self.collection,
                    error = %e,
                    "admin lookup failed, treating account as non-admin"
                );
                false
            }
        }
    }
}

/// Admin iff the identity carries the given role claim.
#[derive(Debug, Clone)]
pub struct RoleClaimPolicy {
    role: String,
}

impl RoleClaimPolicy {
    /// Checks for a custom role name.
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

impl Default for RoleClaimPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_ROLE)
    }
}

impl AdminPolicy for RoleClaimPolicy {
    async fn is_admin(&self, identity: &Identity) -> bool {
        identity.has_role(&self.role)
    }
}

// ---------------------------------------------------------------------------
// AdminState / AdminStatus
// ---------------------------------------------------------------------------

/// What the admin watcher has published so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminState {
    /// The session hasn't resolved yet.
    Unresolved,

    /// A policy check is in flight for this identity.
    Checking(Identity),

    /// Check finished for `identity` (`None` = nobody signed in).
    ///
    /// Keyed on the whole identity, not just the uid: a refreshed token
    /// with different role claims is a different answer.
    Resolved {
        identity: Option<Identity>,
        is_admin: bool,
    },
}

/// Admin status as seen by a guard for one particular session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStatus {
    /// Not known yet for this session's account.
    Pending,
    /// The account is an admin.
    Granted,
    /// The account is not an admin, or nobody is signed in.
    Denied,
}

impl AdminState {
    /// Interprets this state against `session`.
    ///
    /// A result computed for a different identity than the session's
    /// current one (another account, or the same account with other
    /// claims) is stale and reads as [`AdminStatus::Pending`]. A guard
    /// never grants access on an outdated answer.
    pub fn status_for(&self, session: &Session) -> AdminStatus {
        if session.is_loading() {
            return AdminStatus::Pending;
        }
        match self {
            Self::Resolved { identity, is_admin } if identity.as_ref() == session.identity() => {
                if *is_admin {
                    AdminStatus::Granted
                } else {
                    AdminStatus::Denied
                }
            }
            _ => AdminStatus::Pending,
        }
    }
}

// ---------------------------------------------------------------------------
// AdminWatcher
// ---------------------------------------------------------------------------

/// Re-evaluates the admin policy whenever the session's identity changes.
///
/// Runs as its own task next to the [`SessionProvider`](crate::SessionProvider).
/// Lookups are fire-and-forget: no timeout, no retry.
#[derive(Debug)]
pub struct AdminWatcher {
    state: watch::Receiver<AdminState>,
    task: JoinHandle<()>,
}

impl AdminWatcher {
    /// Starts watching `session` and checking accounts with `policy`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<P: AdminPolicy>(policy: Arc<P>, session: watch::Receiver<Session>) -> Self {
        let (tx, rx) = watch::channel(AdminState::Unresolved);
        let task = tokio::spawn(run(policy, session, tx));
        Self { state: rx, task }
    }

    /// The latest published state.
    pub fn state(&self) -> AdminState {
        self.state.borrow().clone()
    }

    /// Admin status for `session`.
    pub fn status(&self, session: &Session) -> AdminStatus {
        self.state.borrow().status_for(session)
    }

    /// Waits until the status for the session's current account is known.
    ///
    /// Returns whatever is known if the watcher stops first.
    pub async fn settled(&self, session: &watch::Receiver<Session>) -> AdminStatus {
        let mut admin = self.state.clone();
        loop {
            let status = admin.borrow_and_update().status_for(&session.borrow());
            if status != AdminStatus::Pending {
                return status;
            }
            if admin.changed().await.is_err() {
                return admin.borrow().status_for(&session.borrow());
            }
        }
    }

    /// Stops the watcher task.
    pub async fn shutdown(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl Drop for AdminWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<P: AdminPolicy>(
    policy: Arc<P>,
    mut session: watch::Receiver<Session>,
    state: watch::Sender<AdminState>,
) {
    // The identity the published state belongs to, once resolved.
    let mut last: Option<Option<Identity>> = None;

    loop {
        let current = session.borrow_and_update().clone();

        if !current.is_loading() {
            let subject = current.identity().cloned();
            if last.as_ref() != Some(&subject) {
                match subject {
                    None => {
                        state.send_replace(AdminState::Resolved {
                            identity: None,
                            is_admin: false,
                        });
                        last = Some(None);
                    }
                    Some(identity) => {
                        state.send_replace(AdminState::Checking(identity.clone()));
                        let is_admin = policy.is_admin(&identity).await;

                        let still_current = session.borrow().identity() == Some(&identity);
                        if still_current {
                            info!(uid = %identity.uid, is_admin, "admin status resolved");
                            state.send_replace(AdminState::Resolved {
                                identity: Some(identity.clone()),
                                is_admin,
                            });
                            last = Some(Some(identity));
                        } else {
                            debug!(uid = %identity.uid, "identity changed during admin check, discarding");
                        }
                    }
                }
            }
        }

        if session.changed().await.is_err() {
            debug!("session closed, admin watcher exiting");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociallens_identity::AccountId;

    fn identity(uid: &str) -> Identity {
        Identity::new(AccountId::new(uid).unwrap())
    }

    #[test]
    fn test_status_for_loading_session_is_pending() {
        let state = AdminState::Resolved {
            identity: None,
            is_admin: false,
        };
        assert_eq!(state.status_for(&Session::loading()), AdminStatus::Pending);
    }

    #[test]
    fn test_status_for_matching_subject() {
        let session = Session::resolved(Some(identity("a")));
        let granted = AdminState::Resolved {
            identity: Some(identity("a")),
            is_admin: true,
        };
        let denied = AdminState::Resolved {
            identity: Some(identity("a")),
            is_admin: false,
        };
        assert_eq!(granted.status_for(&session), AdminStatus::Granted);
        assert_eq!(denied.status_for(&session), AdminStatus::Denied);
    }

    #[test]
    fn test_status_for_stale_subject_is_pending() {
        let session = Session::resolved(Some(identity("b")));
        let stale = AdminState::Resolved {
            identity: Some(identity("a")),
            is_admin: true,
        };
        assert_eq!(stale.status_for(&session), AdminStatus::Pending);
    }

    #[test]
    fn test_status_for_checking_is_pending() {
        let session = Session::resolved(Some(identity("a")));
        let checking = AdminState::Checking(identity("a"));
        assert_eq!(checking.status_for(&session), AdminStatus::Pending);
    }

    #[test]
    fn test_status_for_same_uid_other_claims_is_pending() {
        let session = Session::resolved(Some(identity("a")));
        let before_refresh = AdminState::Resolved {
            identity: Some(identity("a").with_role("admin")),
            is_admin: true,
        };
        assert_eq!(before_refresh.status_for(&session), AdminStatus::Pending);
    }

    #[test]
    fn test_status_for_signed_out_is_denied() {
        let session = Session::resolved(None);
        let state = AdminState::Resolved {
            identity: None,
            is_admin: false,
        };
        assert_eq!(state.status_for(&session), AdminStatus::Denied);
    }

    #[tokio::test]
    async fn test_role_claim_policy_checks_claim_not_email() {
        let policy = RoleClaimPolicy::default();
        let by_claim = identity("a").with_role("admin");
        let by_email = identity("b").with_email("admin@example.com");

        assert!(policy.is_admin(&by_claim).await);
        assert!(!policy.is_admin(&by_email).await);
    }
}
