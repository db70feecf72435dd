//! Per-kind identity schema and selector resolution.
//!
//! A thing is addressed by `(kind, id)`. The kind names a collection; the
//! id lives in one document field, the identity column. By default that is
//! the store's native primary-key field, but a [`Schema`] can override it
//! per kind (a `user`'s id might be its `nickname`). Resolution is a pure
//! lookup: an absent schema or an absent entry is the normal case, not an
//! error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity mapping for a single kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMapping {
    /// Document field holding the logical id for this kind.
    pub id_col: String,
}

/// Optional per-kind overrides of the identity column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    mappings: HashMap<String, TypeMapping>,
}

impl Schema {
    /// Creates an empty schema: every kind uses the native id field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no kind has an override.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Adds an identity-column override for `kind`.
    pub fn with_id_col(mut self, kind: impl Into<String>, id_col: impl Into<String>) -> Self {
        self.mappings.insert(
            kind.into(),
            TypeMapping {
                id_col: id_col.into(),
            },
        );
        self
    }

    /// Resolves the identity column for `kind`, falling back to the
    /// store's native primary-key field.
    pub fn id_col<'a>(&'a self, kind: &str, native: &'a str) -> &'a str {
        self.mappings
            .get(kind)
            .map(|mapping| mapping.id_col.as_str())
            .unwrap_or(native)
    }

    /// Builds the single-field equality selector addressing `(kind, id)`.
    pub fn selector(&self, kind: &str, id: &str, native: &str) -> Value {
        let mut fields = serde_json::Map::with_capacity(1);
        fields.insert(
            self.id_col(kind, native).to_string(),
            Value::String(id.to_string()),
        );
        Value::Object(fields)
    }
}
