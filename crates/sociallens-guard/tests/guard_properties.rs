//! Property-style checks of the guards over every combination of session
//! shape and admin status.

use sociallens_guard::{
    GuardDecision, GuardPaths, Route, admin_only, protected, redirect_if_authenticated,
};
use sociallens_identity::{AccountId, Identity};
use sociallens_session::{AdminStatus, Session};

// =========================================================================
// Helpers
// =========================================================================

fn identity(email: &str) -> Identity {
    Identity::new(AccountId::new("u-42").unwrap()).with_email(email)
}

/// Every session shape a guard can see.
fn sessions() -> Vec<Session> {
    vec![
        Session::loading(),
        Session::resolved(None),
        Session::resolved(Some(identity("a@b.com"))),
        Session::resolved(Some(identity("admin@b.com"))),
    ]
}

const STATUSES: [AdminStatus; 3] = [
    AdminStatus::Pending,
    AdminStatus::Granted,
    AdminStatus::Denied,
];

// =========================================================================
// Properties
// =========================================================================

#[test]
fn test_protected_renders_iff_signed_in_and_resolved() {
    let paths = GuardPaths::default();
    for session in sessions() {
        let decision = protected(&session, &paths);
        let expected_render = session.identity().is_some() && !session.is_loading();
        assert_eq!(decision == GuardDecision::Render, expected_render, "{session:?}");

        if !expected_render {
            let expected = if session.is_loading() {
                GuardDecision::Placeholder
            } else {
                GuardDecision::Redirect(Route::Login)
            };
            assert_eq!(decision, expected, "{session:?}");
        }
    }
}

#[test]
fn test_redirect_if_authenticated_renders_iff_signed_out_and_resolved() {
    let paths = GuardPaths::default();
    for session in sessions() {
        let decision = redirect_if_authenticated(&session, &paths);
        let expected_render = session.identity().is_none() && !session.is_loading();
        assert_eq!(decision == GuardDecision::Render, expected_render, "{session:?}");
    }
}

#[test]
fn test_admin_only_renders_iff_signed_in_resolved_and_granted() {
    let paths = GuardPaths::default();
    for session in sessions() {
        for status in STATUSES {
            let decision = admin_only(&session, status, &paths);
            let expected_render = session.identity().is_some()
                && !session.is_loading()
                && status == AdminStatus::Granted;
            assert_eq!(
                decision == GuardDecision::Render,
                expected_render,
                "{session:?} {status:?}"
            );
        }
    }
}

#[test]
fn test_admin_only_never_trusts_email_text() {
    // "admin" in the address means nothing; only the status counts.
    let session = Session::resolved(Some(identity("admin@b.com")));
    assert_eq!(
        admin_only(&session, AdminStatus::Denied, &GuardPaths::default()),
        GuardDecision::Redirect(Route::Feed)
    );
}

#[test]
fn test_no_guard_redirects_while_loading() {
    let paths = GuardPaths::default();
    let loading = Session::loading();
    assert_eq!(protected(&loading, &paths), GuardDecision::Placeholder);
    assert_eq!(redirect_if_authenticated(&loading, &paths), GuardDecision::Placeholder);
    for status in STATUSES {
        assert_eq!(admin_only(&loading, status, &paths), GuardDecision::Placeholder);
    }
}
