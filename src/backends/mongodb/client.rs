//! Store client over the MongoDB driver.
//!
//! Documents cross the boundary as BSON: JSON values convert on the way
//! in, and driver documents convert back on the way out (driver-added
//! fields such as an `ObjectId` `_id` surface in their extended-JSON
//! form). Duplicate-key violations are classified by server error code so
//! the adapter can normalize them.

use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::bson::{Document, doc};
use mongodb::error::{Error as DriverError, ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, ServerAddress};
use mongodb::{Client, Collection, Database};
use serde_json::Value;

use crate::config::DatabankConfig;
use crate::core::{DocumentStream, StoreClient, StoreCollection, StoreSession};
use crate::error::BackendError;

/// Server error codes that signal a unique-key violation. 11000 is the
/// modern duplicate-key code; 11001 and 12582 are the codes older servers
/// report for the same condition.
const DUPLICATE_KEY_CODES: [i32; 3] = [11000, 11001, 12582];

fn is_duplicate_key(err: &DriverError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            DUPLICATE_KEY_CODES.contains(&write_error.code)
        }
        ErrorKind::Command(command_error) => DUPLICATE_KEY_CODES.contains(&command_error.code),
        _ => false,
    }
}

fn classify(err: DriverError) -> BackendError {
    if is_duplicate_key(&err) {
        BackendError::DuplicateKey {
            message: err.to_string(),
        }
    } else {
        BackendError::Internal {
            backend_name: "mongodb".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

fn to_document(value: &Value) -> Result<Document, BackendError> {
    mongodb::bson::to_document(value).map_err(|err| BackendError::SerializationError {
        message: err.to_string(),
    })
}

fn to_value(document: Document) -> Result<Value, BackendError> {
    mongodb::bson::from_document(document).map_err(|err| BackendError::SerializationError {
        message: err.to_string(),
    })
}

/// MongoDB store client.
#[derive(Debug, Default)]
pub struct MongoClient;

impl MongoClient {
    /// Creates a MongoDB store client.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StoreClient for MongoClient {
    type Session = MongoSession;

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn open_session(&self, config: &DatabankConfig) -> Result<MongoSession, BackendError> {
        let options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: config.host.clone(),
                port: Some(config.port),
            }])
            .build();
        let client = Client::with_options(options).map_err(|err| {
            BackendError::ConnectionFailed {
                backend_name: "mongodb".to_string(),
                message: err.to_string(),
            }
        })?;
        let database = client.database(&config.database);

        // The driver connects lazily; ping so open failures surface here
        // instead of on the first operation.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| BackendError::ConnectionFailed {
                backend_name: "mongodb".to_string(),
                message: err.to_string(),
            })?;
        tracing::debug!(host = %config.host, port = config.port, "mongodb deployment reachable");

        Ok(MongoSession { client, database })
    }
}

/// An open session against a MongoDB deployment.
pub struct MongoSession {
    client: Client,
    database: Database,
}

#[async_trait]
impl StoreSession for MongoSession {
    type Collection = MongoCollection;

    fn collection(&self, name: &str) -> Result<MongoCollection, BackendError> {
        Ok(MongoCollection {
            inner: self.database.collection::<Document>(name),
        })
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}

/// Handle onto one MongoDB collection.
pub struct MongoCollection {
    inner: Collection<Document>,
}

#[async_trait]
impl StoreCollection for MongoCollection {
    async fn insert(&self, document: &Value) -> Result<(), BackendError> {
        let document = to_document(document)?;
        self.inner.insert_one(document).await.map_err(classify)?;
        Ok(())
    }

    async fn find_one(&self, selector: &Value) -> Result<Option<Value>, BackendError> {
        let selector = to_document(selector)?;
        let found = self.inner.find_one(selector).await.map_err(classify)?;
        found.map(to_value).transpose()
    }

    async fn find(&self, criteria: &Value) -> Result<DocumentStream, BackendError> {
        let criteria = to_document(criteria)?;
        let cursor = self.inner.find(criteria).await.map_err(classify)?;
        Ok(cursor
            .map(|item| item.map_err(classify).and_then(to_value))
            .boxed())
    }

    async fn replace(&self, selector: &Value, document: &Value) -> Result<u64, BackendError> {
        let selector = to_document(selector)?;
        let document = to_document(document)?;
        let result = self
            .inner
            .replace_one(selector, document)
            .await
            .map_err(classify)?;
        Ok(result.matched_count)
    }

    async fn remove(&self, selector: &Value) -> Result<u64, BackendError> {
        let selector = to_document(selector)?;
        let result = self.inner.delete_many(selector).await.map_err(classify)?;
        Ok(result.deleted_count)
    }
}
