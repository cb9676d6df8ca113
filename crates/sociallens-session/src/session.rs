//! The session snapshot: who is signed in, and whether we know yet.

use sociallens_identity::{AccountId, Identity};

use crate::AuthEvent;

/// Process-wide knowledge of the signed-in account.
///
/// Two-state lifecycle:
///
/// ```text
///   Loading ──(first auth event)──→ Resolved ──(any later event)──→ Resolved
/// ```
///
/// While loading, "no identity" means "not known yet". Once resolved it
/// means "signed out". The transition happens exactly once and is never
/// undone, which is why the fields are private: only [`apply`](Self::apply)
/// moves the state forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    is_loading: bool,
}

impl Session {
    /// The state at process start: loading, nobody known.
    pub fn loading() -> Self {
        Self {
            identity: None,
            is_loading: true,
        }
    }

    /// A session that has already seen its first auth event.
    pub fn resolved(identity: Option<Identity>) -> Self {
        Self {
            identity,
            is_loading: false,
        }
    }

    /// Applies one auth event. Replaces the identity and ends loading.
    ///
    /// Returns `true` if the signed-in account changed (by uid).
    pub fn apply(&mut self, event: AuthEvent) -> bool {
        let changed = self.subject() != event.as_ref().map(|i| &i.uid);
        self.identity = event;
        self.is_loading = false;
        changed
    }

    /// The signed-in identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The signed-in account id, if any.
    pub fn subject(&self) -> Option<&AccountId> {
        self.identity.as_ref().map(|i| &i.uid)
    }

    /// `true` until the first auth event arrives.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// `true` once resolved with somebody signed in.
    pub fn is_authenticated(&self) -> bool {
        !self.is_loading && self.identity.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(uid: &str) -> Identity {
        Identity::new(AccountId::new(uid).unwrap())
    }

    #[test]
    fn test_default_is_loading_without_identity() {
        let session = Session::default();
        assert!(session.is_loading());
        assert!(session.identity().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_apply_first_event_none_ends_loading() {
        let mut session = Session::loading();
        session.apply(None);
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_apply_any_sequence_loading_false_after_first() {
        // Every firing sequence: loading flips on the first event and
        // never comes back, whatever the events carry.
        let sequences: Vec<Vec<AuthEvent>> = vec![
            vec![None],
            vec![Some(identity("a"))],
            vec![None, Some(identity("a")), None],
            vec![Some(identity("a")), Some(identity("b")), None, None],
        ];

        for events in sequences {
            let mut session = Session::loading();
            for event in events {
                session.apply(event);
                assert!(!session.is_loading());
            }
        }
    }

    #[test]
    fn test_apply_reports_account_changes_only() {
        let mut session = Session::loading();
        assert!(session.apply(Some(identity("a"))));
        // Same account again (token refresh): not a change.
        assert!(!session.apply(Some(identity("a"))));
        assert!(session.apply(Some(identity("b"))));
        assert!(session.apply(None));
        assert!(!session.apply(None));
    }

    #[test]
    fn test_apply_replaces_identity() {
        let mut session = Session::loading();
        session.apply(Some(identity("a")));
        session.apply(Some(identity("b").with_email("b@x.io")));
        let current = session.identity().unwrap();
        assert_eq!(current.uid.as_str(), "b");
        assert_eq!(current.email.as_deref(), Some("b@x.io"));
    }
}
