//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use databank::backends::memory::{MemoryClient, MemoryCollection, MemorySession};
use databank::core::{DocumentStream, StoreClient, StoreCollection, StoreSession};
use databank::{BackendError, Databank, DatabankConfig, DocumentBank};

// ============================================================================
// Fixtures
// ============================================================================

/// A fresh adapter over the in-process store, already connected with the
/// default configuration.
pub async fn connected_bank() -> DocumentBank<MemoryClient> {
    let bank = DocumentBank::memory();
    bank.connect(&DatabankConfig::default())
        .await
        .expect("connect should succeed");
    bank
}

pub fn user(name: &str) -> Value {
    json!({"name": name})
}

// ============================================================================
// Call-recording store client
// ============================================================================

/// Shared counter of capability calls reaching the store.
#[derive(Clone, Default)]
pub struct CallCounter {
    count: Arc<AtomicUsize>,
}

impl CallCounter {
    fn bump(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

/// Store client that counts every capability call before delegating to
/// the in-process memory store. Used to assert that operations refused in
/// the disconnected state never contact the store.
pub struct RecordingClient {
    inner: MemoryClient,
    calls: CallCounter,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self {
            inner: MemoryClient::new(),
            calls: CallCounter::default(),
        }
    }

    /// Handle onto the call counter, usable after the client moves into
    /// an adapter.
    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl StoreClient for RecordingClient {
    type Session = RecordingSession;

    fn backend_name(&self) -> &'static str {
        "recording"
    }

    async fn open_session(
        &self,
        config: &DatabankConfig,
    ) -> Result<RecordingSession, BackendError> {
        self.calls.bump();
        Ok(RecordingSession {
            inner: self.inner.open_session(config).await?,
            calls: self.calls.clone(),
        })
    }
}

pub struct RecordingSession {
    inner: MemorySession,
    calls: CallCounter,
}

#[async_trait]
impl StoreSession for RecordingSession {
    type Collection = RecordingCollection;

    fn collection(&self, name: &str) -> Result<RecordingCollection, BackendError> {
        self.calls.bump();
        Ok(RecordingCollection {
            inner: self.inner.collection(name)?,
            calls: self.calls.clone(),
        })
    }

    async fn close(&self) {
        self.calls.bump();
        self.inner.close().await;
    }
}

pub struct RecordingCollection {
    inner: MemoryCollection,
    calls: CallCounter,
}

#[async_trait]
impl StoreCollection for RecordingCollection {
    async fn insert(&self, document: &Value) -> Result<(), BackendError> {
        self.calls.bump();
        self.inner.insert(document).await
    }

    async fn find_one(&self, selector: &Value) -> Result<Option<Value>, BackendError> {
        self.calls.bump();
        self.inner.find_one(selector).await
    }

    async fn find(&self, criteria: &Value) -> Result<DocumentStream, BackendError> {
        self.calls.bump();
        self.inner.find(criteria).await
    }

    async fn replace(&self, selector: &Value, document: &Value) -> Result<u64, BackendError> {
        self.calls.bump();
        self.inner.replace(selector, document).await
    }

    async fn remove(&self, selector: &Value) -> Result<u64, BackendError> {
        self.calls.bump();
        self.inner.remove(selector).await
    }
}
