//! Integration tests for admin status resolution.

use std::sync::Arc;
use std::time::Duration;

use sociallens_identity::{Document, Identity};
use sociallens_session::{
    AdminStatus, AdminWatcher, AllowListPolicy, AuthService, MemoryAuth, MemoryStore,
    RoleClaimPolicy, SessionProvider,
};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

/// Auth with one admin and one regular account, and a store listing the
/// admin in the allow-list collection.
fn backend() -> (MemoryAuth, MemoryStore) {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();
    let admin = auth.register("root@sociallens.app", "pw");
    auth.register("a@b.com", "pw");
    store.insert("admins", Document::new(admin.uid.as_str()));
    (auth, store)
}

async fn settled(provider: &SessionProvider, watcher: &AdminWatcher) -> AdminStatus {
    let session = provider.watch();
    provider.resolved().await;
    timeout(WAIT, watcher.settled(&session)).await.unwrap()
}

#[tokio::test]
async fn test_signed_out_resolves_denied() {
    let (auth, store) = backend();
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::new(AllowListPolicy::new(store)), provider.watch());

    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Denied);
}

#[tokio::test]
async fn test_allow_listed_account_granted() {
    let (auth, store) = backend();
    auth.sign_in_with_password("root@sociallens.app", "pw").await.unwrap();
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::new(AllowListPolicy::new(store)), provider.watch());

    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Granted);
}

#[tokio::test]
async fn test_regular_account_denied() {
    let (auth, store) = backend();
    auth.sign_in_with_password("a@b.com", "pw").await.unwrap();
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::new(AllowListPolicy::new(store)), provider.watch());

    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Denied);
}

#[tokio::test]
async fn test_admin_looking_email_is_not_enough() {
    let (auth, store) = backend();
    auth.register("admin@evil.example", "pw");
    auth.sign_in_with_password("admin@evil.example", "pw").await.unwrap();
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::new(AllowListPolicy::new(store)), provider.watch());

    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Denied);
}

#[tokio::test]
async fn test_failed_lookup_resolves_denied() {
    let (auth, store) = backend();
    store.fail_collection("admins");
    auth.sign_in_with_password("root@sociallens.app", "pw").await.unwrap();
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::new(AllowListPolicy::new(store)), provider.watch());

    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Denied);
}

#[tokio::test]
async fn test_account_switch_recomputes_status() {
    let (auth, store) = backend();
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::new(AllowListPolicy::new(store)), provider.watch());
    let mut session = provider.watch();
    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Denied);

    let admin = auth.sign_in_with_password("root@sociallens.app", "pw").await.unwrap();
    timeout(WAIT, session.wait_for(|s| s.subject() == Some(&admin.uid)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Granted);

    auth.sign_out().await.unwrap();
    timeout(WAIT, session.wait_for(|s| s.identity().is_none()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Denied);
}

#[tokio::test]
async fn test_role_claim_policy_grants_claimed_admin() {
    let auth = MemoryAuth::new();
    auth.register_with_roles("ops@b.com", "pw", ["admin"]);
    auth.sign_in_with_password("ops@b.com", "pw").await.unwrap();
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::new(RoleClaimPolicy::default()), provider.watch());

    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Granted);
}

#[tokio::test]
async fn test_revoked_role_claim_recomputes_to_denied() {
    let auth = MemoryAuth::new();
    let ops = auth.register_with_roles("ops@b.com", "pw", ["admin"]);
    auth.sign_in_with_password("ops@b.com", "pw").await.unwrap();
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::new(RoleClaimPolicy::default()), provider.watch());
    let mut session = provider.watch();
    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Granted);

    // Token refresh: same account, role claim gone.
    let refreshed = Identity::new(ops.uid.clone()).with_email("ops@b.com");
    auth.emit(Some(refreshed));
    timeout(WAIT, session.wait_for(|s| s.identity().is_some_and(|i| i.roles.is_empty())))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(session.borrow().subject(), Some(&ops.uid));
    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Denied);
}

#[tokio::test]
async fn test_granted_role_claim_recomputes_to_granted() {
    let auth = MemoryAuth::new();
    let ops = auth.register("ops@b.com", "pw");
    auth.sign_in_with_password("ops@b.com", "pw").await.unwrap();
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::new(RoleClaimPolicy::default()), provider.watch());
    let mut session = provider.watch();
    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Denied);

    auth.emit(Some(ops.clone().with_role("admin")));
    timeout(WAIT, session.wait_for(|s| s.identity().is_some_and(|i| i.has_role("admin"))))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(settled(&provider, &watcher).await, AdminStatus::Granted);
}

#[tokio::test]
async fn test_drop_releases_watcher_task() {
    let (auth, store) = backend();
    let policy = Arc::new(AllowListPolicy::new(store));
    let provider = SessionProvider::start(&auth);
    let watcher = AdminWatcher::start(Arc::clone(&policy), provider.watch());
    settled(&provider, &watcher).await;
    assert_eq!(Arc::strong_count(&policy), 2);

    drop(watcher);

    timeout(WAIT, async {
        while Arc::strong_count(&policy) > 1 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("watcher task still holds the policy");
}
