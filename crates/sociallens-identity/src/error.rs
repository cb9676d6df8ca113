//! Error types for the identity layer.

/// Errors raised while constructing identity values.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// An account id was empty or whitespace. Backends never issue one,
    /// so this always means a caller bug or a corrupt payload.
    #[error("account id must not be empty")]
    EmptyAccountId,
}
