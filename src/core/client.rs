//! Store-client capability traits.
//!
//! This is the narrow surface the adapter consumes from the underlying
//! document store: open/close a session, resolve a collection handle, and
//! five operations on a handle. Everything the store does beyond this —
//! query execution, indexing, transport — stays on the other side of these
//! traits. Backends implement them in [`crate::backends`]; tests can
//! implement them to observe exactly which calls reach the store.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde_json::Value;

use crate::config::DatabankConfig;
use crate::error::BackendError;

/// A lazy, finite, forward-only sequence of documents produced by a query.
///
/// The stream is not restartable. A per-item failure surfaces as an `Err`
/// element in place of the document.
pub type DocumentStream = BoxStream<'static, Result<Value, BackendError>>;

/// A store client capable of opening sessions.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// The session type opened by this client.
    type Session: StoreSession;

    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// The store's native primary-key field, used as the identity column
    /// for kinds without a schema override.
    fn id_field(&self) -> &str {
        "_id"
    }

    /// Opens a new session against the store described by `config`.
    async fn open_session(
        &self,
        config: &DatabankConfig,
    ) -> Result<Self::Session, BackendError>;
}

/// An open session with the store.
#[async_trait]
pub trait StoreSession: Send + Sync + 'static {
    /// Collection handle type.
    type Collection: StoreCollection;

    /// Resolves the handle for the named collection.
    ///
    /// The shipped backends cannot fail here, but resolution failures from
    /// other stores surface to the caller unchanged.
    fn collection(&self, name: &str) -> Result<Self::Collection, BackendError>;

    /// Closes the session. Closing yields no error; the session must not
    /// be used afterwards.
    async fn close(&self);
}

/// Operations available on a collection handle.
#[async_trait]
pub trait StoreCollection: Send + Sync {
    /// Inserts a new document.
    ///
    /// Fails with [`BackendError::DuplicateKey`] when the document
    /// violates a unique index.
    async fn insert(&self, document: &Value) -> Result<(), BackendError>;

    /// Finds at most one document matching the selector.
    async fn find_one(&self, selector: &Value) -> Result<Option<Value>, BackendError>;

    /// Queries documents matching the criteria, yielding a cursor stream.
    async fn find(&self, criteria: &Value) -> Result<DocumentStream, BackendError>;

    /// Replaces the first document matching the selector with `document`.
    /// Returns the matched count (0 or 1).
    async fn replace(&self, selector: &Value, document: &Value) -> Result<u64, BackendError>;

    /// Removes every document matching the selector. Returns the removed
    /// count.
    async fn remove(&self, selector: &Value) -> Result<u64, BackendError>;
}
