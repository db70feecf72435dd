//! The adapter-facing storage trait.
//!
//! [`Databank`] is the uniform contract callers program against: a
//! connect/disconnect lifecycle plus type-agnostic CRUD and streaming
//! search over things addressed by `(kind, id)`. The adapter in
//! [`crate::bank`] is one implementation; other store backends can share
//! the same interface.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::DatabankConfig;
use crate::core::search::SearchStream;
use crate::error::{DatabankError, DatabankResult};

/// Uniform storage interface over a document store.
///
/// Every operation resolves its future exactly once, with either the value
/// or a [`DatabankError`]. All operations except `connect` require an open
/// session and fail with [`DatabankError::NotConnected`] — without
/// contacting the store — otherwise.
///
/// # Example
///
/// ```no_run
/// use databank::{Databank, DatabankConfig, DocumentBank};
/// use serde_json::json;
///
/// # async fn example() -> databank::DatabankResult<()> {
/// let bank = DocumentBank::memory();
/// bank.connect(&DatabankConfig::default()).await?;
///
/// let stored = bank.create("user", "alice", json!({"name": "Alice"})).await?;
/// let found = bank.read("user", "alice").await?;
/// assert_eq!(found, stored);
///
/// bank.disconnect().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Databank: Send + Sync {
    /// Returns a human-readable name for the underlying backend.
    fn backend_name(&self) -> &'static str;

    /// Opens a session against the store.
    ///
    /// Installs the config's identity schema for the lifetime of the
    /// session.
    ///
    /// # Errors
    ///
    /// * [`DatabankError::AlreadyConnected`] — a session is already open;
    ///   no I/O is performed and the existing session is unaffected
    /// * [`DatabankError::Backend`] — the store could not be reached; the
    ///   open error passes through unchanged
    async fn connect(&self, config: &DatabankConfig) -> DatabankResult<()>;

    /// Closes the session and returns to the disconnected state.
    ///
    /// # Errors
    ///
    /// * [`DatabankError::NotConnected`] — no session is open; no I/O is
    ///   performed
    async fn disconnect(&self) -> DatabankResult<()>;

    /// Creates a new thing.
    ///
    /// `value` must be a JSON object; the resolved identity column is
    /// written into the stored document so the thing is addressable by
    /// `(kind, id)`. Returns the document as stored.
    ///
    /// # Errors
    ///
    /// * [`DatabankError::AlreadyExists`] — a thing with this identity
    ///   already exists
    /// * [`DatabankError::NotAnObject`] — `value` is not a JSON object
    async fn create(&self, kind: &str, id: &str, value: Value) -> DatabankResult<Value>;

    /// Reads an existing thing.
    ///
    /// # Errors
    ///
    /// * [`DatabankError::NotExists`] — no thing with this identity
    async fn read(&self, kind: &str, id: &str) -> DatabankResult<Value>;

    /// Replaces an existing thing's content with `value`.
    ///
    /// This is a full replace, not a merge: fields absent from `value`
    /// are gone afterwards. Returns the new document as stored.
    ///
    /// # Errors
    ///
    /// * [`DatabankError::NotExists`] — no thing with this identity
    /// * [`DatabankError::NotAnObject`] — `value` is not a JSON object
    async fn update(&self, kind: &str, id: &str, value: Value) -> DatabankResult<Value>;

    /// Deletes an existing thing.
    ///
    /// # Errors
    ///
    /// * [`DatabankError::NotExists`] — no thing with this identity
    async fn delete(&self, kind: &str, id: &str) -> DatabankResult<()>;

    /// Searches a kind by exact-match criteria.
    ///
    /// `criteria` is a JSON object of field→value equality conjunctions;
    /// dotted field paths reach into nested documents. Matching documents
    /// arrive through the returned [`SearchStream`] in cursor order.
    async fn search(&self, kind: &str, criteria: Value) -> DatabankResult<SearchStream>;

    /// Checks whether a thing exists.
    async fn exists(&self, kind: &str, id: &str) -> DatabankResult<bool> {
        match self.read(kind, id).await {
            Ok(_) => Ok(true),
            Err(DatabankError::NotExists { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Updates a thing, creating it when it does not exist yet.
    async fn save(&self, kind: &str, id: &str, value: Value) -> DatabankResult<Value> {
        match self.update(kind, id, value.clone()).await {
            Err(DatabankError::NotExists { .. }) => self.create(kind, id, value).await,
            outcome => outcome,
        }
    }

    /// Reads several things of one kind; misses come back as `None`.
    async fn read_all(
        &self,
        kind: &str,
        ids: &[&str],
    ) -> DatabankResult<HashMap<String, Option<Value>>> {
        let mut results = HashMap::with_capacity(ids.len());
        for id in ids {
            match self.read(kind, id).await {
                Ok(value) => {
                    results.insert((*id).to_string(), Some(value));
                }
                Err(DatabankError::NotExists { .. }) => {
                    results.insert((*id).to_string(), None);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(results)
    }
}
