//! Admin portal sign-in.
//!
//! The admin login page signs in like any other, then checks the account
//! against the admin policy before letting it through. A non-admin is
//! signed straight back out, so a failed portal login never leaves a
//! session behind.

use sociallens_identity::Identity;
use sociallens_session::{AdminPolicy, AuthService};
use tracing::{info, warn};

use crate::{App, SocialLensError};

impl<A: AuthService, P: AdminPolicy> App<A, P> {
    /// Signs in through the admin portal.
    ///
    /// # Errors
    /// - [`SocialLensError::Session`] if the credentials are rejected.
    /// - [`SocialLensError::AccessDenied`] if the account isn't an admin
    ///   (it has been signed out again by the time this returns).
    pub async fn admin_sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, SocialLensError> {
        let identity = self.auth.sign_in_with_password(email, password).await?;

        if self.policy.is_admin(&identity).await {
            self.wait_for_subject(Some(&identity.uid)).await;
            info!(uid = %identity.uid, "admin portal sign-in");
            return Ok(identity);
        }

        warn!(uid = %identity.uid, "admin portal sign-in by non-admin, signing out");
        self.auth.sign_out().await?;
        self.wait_for_subject(None).await;
        Err(SocialLensError::AccessDenied(identity.uid))
    }
}
