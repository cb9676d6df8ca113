//! Application configuration.
//!
//! Everything has a default, so an empty JSON object (or no file at all)
//! gives the stock client: the stock route table and the `admins`
//! allow-list.
//!
//! ```json
//! {
//!   "routes": { "admin": { "login": "/admin/login", "home": "/" } },
//!   "admin": { "kind": "role_claim", "role": "admin" },
//!   "max_redirects": 4
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use sociallens_guard::{DEFAULT_MAX_REDIRECTS, RouteTableConfig};
use sociallens_identity::Identity;
use sociallens_session::{
    AdminPolicy, AllowListPolicy, DEFAULT_ADMIN_COLLECTION, DEFAULT_ADMIN_ROLE, DocumentStore,
    RoleClaimPolicy,
};

use crate::SocialLensError;

// ---------------------------------------------------------------------------
// AdminPolicyConfig
// ---------------------------------------------------------------------------

/// How admin status is decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdminPolicyConfig {
    /// A document named after the uid exists in `collection`.
    AllowList {
        #[serde(default = "default_collection")]
        collection: String,
    },
    /// The identity carries the `role` claim.
    RoleClaim {
        #[serde(default = "default_role")]
        role: String,
    },
}

fn default_collection() -> String {
    DEFAULT_ADMIN_COLLECTION.to_string()
}

fn default_role() -> String {
    DEFAULT_ADMIN_ROLE.to_string()
}

impl Default for AdminPolicyConfig {
    fn default() -> Self {
        Self::AllowList {
            collection: default_collection(),
        }
    }
}

impl AdminPolicyConfig {
    /// Builds the configured policy. `store` is only read by the
    /// allow-list variant.
    pub fn build<S: DocumentStore>(&self, store: S) -> ConfiguredPolicy<S> {
        match self {
            Self::AllowList { collection } => {
                ConfiguredPolicy::AllowList(AllowListPolicy::with_collection(store, collection))
            }
            Self::RoleClaim { role } => ConfiguredPolicy::RoleClaim(RoleClaimPolicy::new(role)),
        }
    }
}

/// An [`AdminPolicy`] chosen at runtime from [`AdminPolicyConfig`].
#[derive(Debug)]
pub enum ConfiguredPolicy<S> {
    AllowList(AllowListPolicy<S>),
    RoleClaim(RoleClaimPolicy),
}

impl<S: DocumentStore> AdminPolicy for ConfiguredPolicy<S> {
    async fn is_admin(&self, identity: &Identity) -> bool {
        match self {
            Self::AllowList(policy) => policy.is_admin(identity).await,
            Self::RoleClaim(policy) => policy.is_admin(identity).await,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Top-level configuration for [`App`](crate::App).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Redirect targets of the route guards.
    pub routes: RouteTableConfig,

    /// Admin status policy.
    pub admin: AdminPolicyConfig,

    /// Redirect hops a navigation may take before it is reported as a loop.
    pub max_redirects: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            routes: RouteTableConfig::default(),
            admin: AdminPolicyConfig::default(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl AppConfig {
    /// Parses a JSON document.
    ///
    /// # Errors
    /// [`SocialLensError::ConfigParse`] on malformed JSON, unknown route
    /// paths or an unknown policy kind.
    pub fn from_json_str(json: &str) -> Result<Self, SocialLensError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    ///
    /// # Errors
    /// [`SocialLensError::ConfigRead`] if the file can't be read, otherwise
    /// as [`from_json_str`](Self::from_json_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SocialLensError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SocialLensError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
