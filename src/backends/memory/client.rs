//! Store client backed by in-process collections.
//!
//! Plays the role the external document store plays in production: named
//! collections of JSON documents with a unique native `_id`, addressed by
//! field-equality selectors with dotted-path traversal. Collections are
//! owned by the client and shared with its sessions, so data survives a
//! disconnect/reconnect cycle the way a server's data would.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream;
use parking_lot::RwLock;
use serde_json::Value;

use crate::config::DatabankConfig;
use crate::core::{DocumentStream, StoreClient, StoreCollection, StoreSession};
use crate::error::BackendError;

type Collections = Arc<RwLock<HashMap<String, Vec<Value>>>>;

/// In-process store client.
#[derive(Debug, Default)]
pub struct MemoryClient {
    collections: Collections,
}

impl MemoryClient {
    /// Creates an empty in-process store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreClient for MemoryClient {
    type Session = MemorySession;

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn open_session(
        &self,
        _config: &DatabankConfig,
    ) -> Result<MemorySession, BackendError> {
        Ok(MemorySession {
            collections: Arc::clone(&self.collections),
        })
    }
}

/// An open session against the in-process store.
pub struct MemorySession {
    collections: Collections,
}

#[async_trait]
impl StoreSession for MemorySession {
    type Collection = MemoryCollection;

    fn collection(&self, name: &str) -> Result<MemoryCollection, BackendError> {
        Ok(MemoryCollection {
            name: name.to_string(),
            collections: Arc::clone(&self.collections),
        })
    }

    async fn close(&self) {}
}

/// Handle onto one named collection.
pub struct MemoryCollection {
    name: String,
    collections: Collections,
}

/// Looks up a possibly dotted field path inside a document.
fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Field-equality conjunction over every selector entry. An empty
/// selector matches every document.
fn matches(document: &Value, selector: &Value) -> bool {
    let Some(fields) = selector.as_object() else {
        return false;
    };
    fields
        .iter()
        .all(|(path, expected)| lookup(document, path) == Some(expected))
}

#[async_trait]
impl StoreCollection for MemoryCollection {
    async fn insert(&self, document: &Value) -> Result<(), BackendError> {
        let mut collections = self.collections.write();
        let documents = collections.entry(self.name.clone()).or_default();
        if let Some(id) = document.get("_id") {
            if documents
                .iter()
                .any(|existing| existing.get("_id") == Some(id))
            {
                return Err(BackendError::DuplicateKey {
                    message: format!("_id {id} already present in {}", self.name),
                });
            }
        }
        documents.push(document.clone());
        Ok(())
    }

    async fn find_one(&self, selector: &Value) -> Result<Option<Value>, BackendError> {
        let collections = self.collections.read();
        Ok(collections.get(&self.name).and_then(|documents| {
            documents
                .iter()
                .find(|document| matches(document, selector))
                .cloned()
        }))
    }

    async fn find(&self, criteria: &Value) -> Result<DocumentStream, BackendError> {
        let matching: Vec<Value> = {
            let collections = self.collections.read();
            collections
                .get(&self.name)
                .map(|documents| {
                    documents
                        .iter()
                        .filter(|document| matches(document, criteria))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };
        Ok(stream::iter(matching.into_iter().map(Ok)).boxed())
    }

    async fn replace(&self, selector: &Value, document: &Value) -> Result<u64, BackendError> {
        let mut collections = self.collections.write();
        let Some(documents) = collections.get_mut(&self.name) else {
            return Ok(0);
        };
        match documents
            .iter()
            .position(|existing| matches(existing, selector))
        {
            Some(index) => {
                documents[index] = document.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove(&self, selector: &Value) -> Result<u64, BackendError> {
        let mut collections = self.collections.write();
        let Some(documents) = collections.get_mut(&self.name) else {
            return Ok(0);
        };
        let before = documents.len();
        documents.retain(|existing| !matches(existing, selector));
        Ok((before - documents.len()) as u64)
    }
}
