//! Unified error type for SocialLens.

use std::path::PathBuf;

use sociallens_guard::GuardError;
use sociallens_identity::{AccountId, IdentityError};
use sociallens_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` variants let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SocialLensError {
    /// An identity value was malformed.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The auth service or document store failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Route resolution or navigation failed.
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// The configuration file couldn't be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration wasn't valid JSON for [`AppConfig`](crate::AppConfig).
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Admin portal sign-in by an account that isn't an admin. The
    /// account has already been signed back out.
    #[error("access denied: account {0} is not an administrator")]
    AccessDenied(AccountId),
}

#[cfg(test)]
mod tests {
    use sociallens_guard::Route;

    use super::*;

    #[test]
    fn test_from_session_error() {
        let err: SocialLensError = SessionError::AuthFailed("nope".into()).into();
        assert!(matches!(err, SocialLensError::Session(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_from_guard_error() {
        let err: SocialLensError = GuardError::GuardedLoginPath(Route::Admin).into();
        assert!(matches!(err, SocialLensError::Guard(_)));
        assert!(err.to_string().contains("/admin"));
    }

    #[test]
    fn test_from_identity_error() {
        let err: SocialLensError = IdentityError::EmptyAccountId.into();
        assert!(matches!(err, SocialLensError::Identity(_)));
    }

    #[test]
    fn test_access_denied_names_account() {
        let uid = AccountId::new("u-9").unwrap();
        let err = SocialLensError::AccessDenied(uid);
        assert_eq!(
            err.to_string(),
            "access denied: account u-9 is not an administrator"
        );
    }
}
