//! Documents returned by the backend document store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single document read from a backend collection.
///
/// The store is schemaless, so fields stay as raw JSON values. Callers
/// that only care whether a document exists (the admin allow-list) never
/// look at them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id within its collection.
    pub id: String,

    /// Field values, keyed by field name.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Creates an empty document.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Sets a field, replacing any previous value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
