//! Error types for the databank adapter.
//!
//! Operations report their outcome through a closed, store-independent
//! taxonomy: connection-state violations are caught locally and never reach
//! the store, normalized errors carry the logical identity of the thing
//! involved, and everything else passes through as a [`BackendError`]
//! verbatim. Nothing is retried, nothing is swallowed, nothing panics.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all databank operations.
#[derive(Error, Debug)]
pub enum DatabankError {
    /// An operation was attempted while no session is open.
    #[error("not connected to the store")]
    NotConnected,

    /// `connect` was called while a session is already open.
    #[error("already connected to the store")]
    AlreadyConnected,

    /// A thing with the given identity already exists.
    #[error("already exists: {kind}/{id}")]
    AlreadyExists { kind: String, id: String },

    /// No thing with the given identity exists.
    #[error("no such thing: {kind}/{id}")]
    NotExists { kind: String, id: String },

    /// A value or criteria document was not a JSON object.
    #[error("{what} is not a JSON object")]
    NotAnObject { what: String },

    /// Unclassified store failure, passed through verbatim.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors originating from the underlying document store.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Opening a session against the store failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// A unique-key constraint was violated.
    #[error("duplicate key: {message}")]
    DuplicateKey { message: String },

    /// Query execution failed.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// A document could not be converted to or from the store's format.
    #[error("serialization error: {message}")]
    SerializationError { message: String },

    /// Internal store error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for databank operations.
pub type DatabankResult<T> = Result<T, DatabankError>;

impl From<serde_json::Error> for DatabankError {
    fn from(err: serde_json::Error) -> Self {
        DatabankError::Backend(BackendError::SerializationError {
            message: err.to_string(),
        })
    }
}
