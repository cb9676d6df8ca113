//! Identity types issued by the authentication service.
//!
//! An [`Identity`] is what the rest of SocialLens knows about a signed-in
//! account. It is opaque in the sense that nothing here validates it: the
//! auth service issues it, and the session layer just carries it around.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::IdentityError;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// The stable, backend-assigned id of an account (the "uid").
///
/// Newtype over `String` so an account id can't be confused with an email
/// or a collection name in function signatures. Serialized as the bare
/// string, and rejected on deserialize if it is blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Wraps a uid, rejecting empty or whitespace-only values.
    pub fn new(uid: impl Into<String>) -> Result<Self, IdentityError> {
        let uid = uid.into();
        if uid.trim().is_empty() {
            return Err(IdentityError::EmptyAccountId);
        }
        Ok(Self(uid))
    }

    /// Borrows the raw uid, e.g. as a document id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A signed-in account as reported by the authentication service.
///
/// `roles` are claims the auth service attached to the account's token.
/// They are server-verified: the client cannot add to them, which is what
/// makes them usable for authorization (unlike, say, the email address).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend-assigned account id.
    pub uid: AccountId,

    /// Sign-in email, if the account has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Display name shown in the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Role claims issued by the auth service.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub roles: BTreeSet<String>,
}

impl Identity {
    /// Creates an identity with only a uid.
    pub fn new(uid: AccountId) -> Self {
        Self {
            uid,
            email: None,
            display_name: None,
            roles: BTreeSet::new(),
        }
    }

    /// Sets the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Adds a role claim.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Returns `true` if the auth service issued the given role claim.
    ///
    /// Comparison is exact. Role names are identifiers, not free text.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}
