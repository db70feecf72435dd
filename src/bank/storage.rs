//! `Databank` implementation: session lifecycle and CRUD.
//!
//! Every operation follows the same skeleton: require an open session
//! (no store contact otherwise), resolve the collection handle for the
//! kind, resolve the selector, invoke the store capability, normalize the
//! outcome. Duplicate-key and miss facts reported by the store become
//! `AlreadyExists`/`NotExists` carrying the logical identity; anything
//! else passes through unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::DatabankConfig;
use crate::core::search::SearchStream;
use crate::core::{Databank, StoreClient, StoreCollection, StoreSession};
use crate::error::{BackendError, DatabankError, DatabankResult};

use super::{BankSession, DocumentBank};

#[async_trait]
impl<C: StoreClient> Databank for DocumentBank<C> {
    fn backend_name(&self) -> &'static str {
        self.client.backend_name()
    }

    async fn connect(&self, config: &DatabankConfig) -> DatabankResult<()> {
        // Held across the open so a concurrent connect cannot race a
        // second session into existence.
        let mut state = self.state.write().await;
        if state.is_some() {
            return Err(DatabankError::AlreadyConnected);
        }
        let session = self.client.open_session(config).await?;
        tracing::debug!(
            backend = self.client.backend_name(),
            host = %config.host,
            port = config.port,
            database = %config.database,
            "session opened"
        );
        *state = Some(BankSession {
            session: Arc::new(session),
            schema: Arc::new(config.schema.clone()),
        });
        Ok(())
    }

    async fn disconnect(&self) -> DatabankResult<()> {
        let taken = self.state.write().await.take();
        match taken {
            None => Err(DatabankError::NotConnected),
            Some(bank_session) => {
                // The handle is already cleared; closing yields no error.
                bank_session.session.close().await;
                tracing::debug!(backend = self.client.backend_name(), "session closed");
                Ok(())
            }
        }
    }

    async fn create(&self, kind: &str, id: &str, value: Value) -> DatabankResult<Value> {
        let state = self.require_session().await?;
        let collection = state.session.collection(kind)?;
        let document = self.stamp_identity(&state, kind, id, value)?;
        match collection.insert(&document).await {
            Ok(()) => Ok(document),
            Err(BackendError::DuplicateKey { .. }) => Err(DatabankError::AlreadyExists {
                kind: kind.to_string(),
                id: id.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn read(&self, kind: &str, id: &str) -> DatabankResult<Value> {
        let state = self.require_session().await?;
        let collection = state.session.collection(kind)?;
        let selector = self.selector_for(&state, kind, id);
        match collection.find_one(&selector).await? {
            Some(document) => Ok(document),
            None => Err(DatabankError::NotExists {
                kind: kind.to_string(),
                id: id.to_string(),
            }),
        }
    }

    async fn update(&self, kind: &str, id: &str, value: Value) -> DatabankResult<Value> {
        let state = self.require_session().await?;
        let collection = state.session.collection(kind)?;
        let selector = self.selector_for(&state, kind, id);
        let document = self.stamp_identity(&state, kind, id, value)?;
        let matched = collection.replace(&selector, &document).await?;
        if matched == 0 {
            return Err(DatabankError::NotExists {
                kind: kind.to_string(),
                id: id.to_string(),
            });
        }
        Ok(document)
    }

    async fn delete(&self, kind: &str, id: &str) -> DatabankResult<()> {
        let state = self.require_session().await?;
        let collection = state.session.collection(kind)?;
        let selector = self.selector_for(&state, kind, id);
        let removed = collection.remove(&selector).await?;
        if removed == 0 {
            return Err(DatabankError::NotExists {
                kind: kind.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn search(&self, kind: &str, criteria: Value) -> DatabankResult<SearchStream> {
        self.search_stream(kind, criteria).await
    }
}
