//! The document-store adapter.
//!
//! [`DocumentBank`] implements the [`Databank`](crate::core::Databank)
//! contract over any [`StoreClient`]: it owns the single session handle
//! and its state machine, resolves logical `(kind, id)` identity into
//! collection names and selectors, normalizes store outcomes into the
//! adapter taxonomy, and wraps query cursors for streaming delivery.

mod search;
mod storage;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::core::StoreClient;
use crate::error::{DatabankError, DatabankResult};
use crate::schema::Schema;

/// State held while a session is open: the handle plus the identity
/// schema installed at connect time.
struct BankSession<S> {
    session: Arc<S>,
    schema: Arc<Schema>,
}

impl<S> Clone for BankSession<S> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            schema: Arc::clone(&self.schema),
        }
    }
}

/// A uniform storage adapter over a document-store client.
///
/// Holds at most one live session. The connect/disconnect transition
/// happens under a write lock, so concurrent `connect` calls cannot open
/// two sessions: the loser observes the winner's session and fails with
/// [`DatabankError::AlreadyConnected`]. Operations clone the session
/// handle out of the lock and perform their I/O without holding it; the
/// adapter adds no queueing, retry, cancellation, or timeout on top of
/// the store client.
pub struct DocumentBank<C: StoreClient> {
    client: C,
    state: RwLock<Option<BankSession<C::Session>>>,
}

impl<C: StoreClient> DocumentBank<C> {
    /// Creates a disconnected adapter over the given store client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: RwLock::new(None),
        }
    }

    /// Returns whether a session is currently open.
    pub async fn is_connected(&self) -> bool {
        self.state.read().await.is_some()
    }

    /// Clones out the live session, or fails with `NotConnected` before
    /// any store contact.
    async fn require_session(&self) -> DatabankResult<BankSession<C::Session>> {
        self.state
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or(DatabankError::NotConnected)
    }

    /// Writes the resolved identity column into the document, making the
    /// thing addressable by its logical `(kind, id)`.
    fn stamp_identity(
        &self,
        state: &BankSession<C::Session>,
        kind: &str,
        id: &str,
        value: Value,
    ) -> DatabankResult<Value> {
        let Value::Object(mut fields) = value else {
            return Err(DatabankError::NotAnObject {
                what: format!("value for {kind}/{id}"),
            });
        };
        let id_col = state.schema.id_col(kind, self.client.id_field());
        fields.insert(id_col.to_string(), Value::String(id.to_string()));
        Ok(Value::Object(fields))
    }

    fn selector_for(&self, state: &BankSession<C::Session>, kind: &str, id: &str) -> Value {
        state.schema.selector(kind, id, self.client.id_field())
    }
}

#[cfg(feature = "memory")]
impl DocumentBank<crate::backends::memory::MemoryClient> {
    /// Creates an adapter over a fresh in-process memory store.
    pub fn memory() -> Self {
        Self::new(crate::backends::memory::MemoryClient::new())
    }
}

#[cfg(feature = "mongodb")]
impl DocumentBank<crate::backends::mongodb::MongoClient> {
    /// Creates an adapter over a MongoDB store.
    pub fn mongodb() -> Self {
        Self::new(crate::backends::mongodb::MongoClient::new())
    }
}
