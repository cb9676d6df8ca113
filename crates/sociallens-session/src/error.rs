//! Error types for the session layer.

/// Errors that can occur while talking to the backend collaborators.
///
/// Guards never see these. The admin policy coerces a failed lookup to
/// "not admin", and the session provider has no error states at all.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Sign-in was rejected by the [`AuthService`](crate::AuthService).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The document store could not answer (network or permission error).
    #[error("lookup of {collection}/{id} failed: {reason}")]
    LookupFailed {
        collection: String,
        id: String,
        reason: String,
    },
}
