//! In-memory backends for development, demos and tests.
//!
//! [`MemoryAuth`] behaves like a hosted auth service with a handful of
//! accounts: it delivers the current state to each new subscriber,
//! broadcasts on sign-in/sign-out, and forgets a subscriber when its
//! [`AuthSubscription`] is dropped. [`MemoryStore`] is a document store
//! whose collections can be told to fail, to exercise the lookup-failed
//! path.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use rand::Rng;
use sociallens_identity::{AccountId, Document, Identity};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{AuthEvent, AuthService, AuthSubscription, DocumentStore, SessionError};

// ---------------------------------------------------------------------------
// MemoryAuth
// ---------------------------------------------------------------------------

struct Account {
    password: String,
    identity: Identity,
}

#[derive(Default)]
struct AuthInner {
    /// Accounts keyed by lowercased email.
    accounts: HashMap<String, Account>,
    current: Option<Identity>,
    listeners: HashMap<u64, mpsc::UnboundedSender<AuthEvent>>,
    next_listener: u64,
}

impl AuthInner {
    /// Sets the current account and tells every live listener.
    fn publish(&mut self, event: AuthEvent) {
        self.current = event.clone();
        // A send only fails if the receiver is gone; forget those.
        self.listeners
            .retain(|_, listener| listener.send(event.clone()).is_ok());
    }
}

/// An auth service that keeps its accounts in memory.
#[derive(Clone, Default)]
pub struct MemoryAuth {
    inner: Arc<Mutex<AuthInner>>,
}

impl MemoryAuth {
    /// Creates a service with no accounts and nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account and returns its identity. Nobody is signed in
    /// as a side effect.
    pub fn register(&self, email: &str, password: &str) -> Identity {
        self.register_with_roles(email, password, std::iter::empty::<&str>())
    }

    /// Creates an account carrying the given role claims.
    pub fn register_with_roles<'a>(
        &self,
        email: &str,
        password: &str,
        roles: impl IntoIterator<Item = &'a str>,
    ) -> Identity {
        let identity = roles
            .into_iter()
            .fold(Identity::new(generate_uid()).with_email(email), |id, role| {
                id.with_role(role)
            });

        self.lock().accounts.insert(
            email.to_lowercase(),
            Account {
                password: password.to_string(),
                identity: identity.clone(),
            },
        );
        debug!(uid = %identity.uid, "account registered");
        identity
    }

    /// Pushes an arbitrary auth event to every subscriber, as the real
    /// service does on token refresh or a sign-in in another tab.
    pub fn emit(&self, event: AuthEvent) {
        self.lock().publish(event);
    }

    /// The currently signed-in identity.
    pub fn current(&self) -> Option<Identity> {
        self.lock().current.clone()
    }

    /// How many subscriptions are still registered.
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Drops every subscriber's channel, as if the connection to the
    /// service was lost. Subscribers just stop receiving events.
    pub fn disconnect_all(&self) {
        let mut inner = self.lock();
        let dropped = inner.listeners.len();
        inner.listeners.clear();
        info!(dropped, "auth service connection dropped");
    }

    fn lock(&self) -> MutexGuard<'_, AuthInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_sign_in(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let mut inner = self.lock();
        let identity = match inner.accounts.get(&email.to_lowercase()) {
            Some(account) if account.password == password => account.identity.clone(),
            _ => return Err(SessionError::AuthFailed("invalid email or password".into())),
        };
        inner.publish(Some(identity.clone()));
        info!(uid = %identity.uid, "signed in");
        Ok(identity)
    }
}

impl AuthService for MemoryAuth {
    fn subscribe(&self) -> AuthSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut inner = self.lock();
            let id = inner.next_listener;
            inner.next_listener += 1;
            // First delivery: the state as of subscribing. The receiver
            // picks it up on its next poll, not synchronously.
            let _ = tx.send(inner.current.clone());
            inner.listeners.insert(id, tx);
            id
        };
        debug!(listener = id, "auth listener registered");

        let registry: Weak<Mutex<AuthInner>> = Arc::downgrade(&self.inner);
        AuthSubscription::new(rx, move || {
            if let Some(inner) = registry.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .listeners
                    .remove(&id);
                debug!(listener = id, "auth listener removed");
            }
        })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, SessionError> {
        self.try_sign_in(email, password)
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        self.lock().publish(None);
        info!("signed out");
        Ok(())
    }
}

/// Generates a random 28-character account id.
fn generate_uid() -> AccountId {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    let uid: String = (0..28)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    // 28 characters from a non-whitespace alphabet are never blank.
    AccountId::new(uid).expect("generated uid is never blank")
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Default)]
struct StoreInner {
    collections: HashMap<String, HashMap<String, Document>>,
    failing: HashSet<String>,
}

/// A document store held in memory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a document.
    pub fn insert(&self, collection: &str, document: Document) {
        self.lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(document.id.clone(), document);
    }

    /// Removes a document, returning it if it existed.
    pub fn remove(&self, collection: &str, id: &str) -> Option<Document> {
        self.lock().collections.get_mut(collection)?.remove(id)
    }

    /// Makes every read from `collection` fail, as a denied permission
    /// rule or a dropped connection would.
    pub fn fail_collection(&self, collection: &str) {
        self.lock().failing.insert(collection.to_string());
    }

    /// Undoes [`fail_collection`](Self::fail_collection).
    pub fn heal_collection(&self, collection: &str) {
        self.lock().failing.remove(collection);
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self, collection: &str, id: &str) -> Result<Option<Document>, SessionError> {
        let inner = self.lock();
        if inner.failing.contains(collection) {
            return Err(SessionError::LookupFailed {
                collection: collection.to_string(),
                id: id.to_string(),
                reason: "permission denied".into(),
            });
        }
        Ok(inner
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }
}

impl DocumentStore for MemoryStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, SessionError> {
        self.read(collection, id)
    }
}
