//! The document lookup collaborator.

use std::future::Future;
use std::sync::Arc;

use sociallens_identity::Document;

use crate::SessionError;

/// Read access to the backend document database.
///
/// Only point reads are needed here: the admin allow-list is "does a
/// document with this account's id exist in this collection".
pub trait DocumentStore: Send + Sync + 'static {
    /// Fetches one document, or `None` if it doesn't exist.
    ///
    /// # Errors
    /// [`SessionError::LookupFailed`] on network or permission errors.
    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Document>, SessionError>> + Send;
}

impl<S: DocumentStore> DocumentStore for Arc<S> {
    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Document>, SessionError>> + Send {
        (**self).get_document(collection, id)
    }
}
