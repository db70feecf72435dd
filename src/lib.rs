//! Uniform document-store adapter.
//!
//! This crate exposes a small, type-agnostic key/value-and-document
//! interface — connect, create, read, update, delete, search — over an
//! underlying document store, translating store-specific connection states
//! and errors into a stable, store-independent contract. Things are
//! addressed by a logical `(kind, id)` pair: the kind maps 1:1 to a store
//! collection, the id lives in a per-kind identity column. The store
//! itself (query execution, indexing, transport, persistence) stays behind
//! a narrow client capability set.
//!
//! # Features
//!
//! Backends are enabled with feature flags in `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! databank = { version = "0.1", features = ["mongodb"] }
//! ```
//!
//! - `memory` (default) — in-process collections, great for development
//!   and tests
//! - `mongodb` — MongoDB document storage
//!
//! # Architecture
//!
//! - [`core`] — the [`Databank`] contract and the store-client capability
//!   traits
//! - [`bank`] — [`DocumentBank`], the adapter over any store client
//! - [`backends`] — store-client implementations
//! - [`schema`] — per-kind identity-column overrides
//! - [`config`] — connection configuration
//! - [`error`] — the adapter error taxonomy
//!
//! # Quick Start
//!
//! ```no_run
//! use databank::{Databank, DatabankConfig, DocumentBank, Schema};
//! use serde_json::json;
//!
//! # async fn example() -> databank::DatabankResult<()> {
//! // A user's logical id is its nickname, not the store's native key.
//! let config = DatabankConfig::default()
//!     .with_schema(Schema::new().with_id_col("user", "nickname"));
//!
//! let bank = DocumentBank::memory();
//! bank.connect(&config).await?;
//!
//! bank.create("user", "alice", json!({"name": "Alice"})).await?;
//! let alice = bank.read("user", "alice").await?;
//! assert_eq!(alice["name"], "Alice");
//!
//! // Stream everything matching an exact-match criteria document.
//! let results = bank.search("user", json!({"name": "Alice"})).await?;
//! results.drain(|user| println!("{user}")).await?;
//!
//! bank.disconnect().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Connection model
//!
//! Each adapter instance holds at most one live session. Operations other
//! than `connect` fail with [`DatabankError::NotConnected`] — without
//! contacting the store — until a session is open. Concurrent operations
//! against one session are multiplexed by the store client; the adapter
//! adds no pooling, retry, cancellation, or timeout.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod bank;
pub mod config;
pub mod core;
pub mod error;
pub mod schema;

// Re-export commonly used types at crate root
pub use bank::DocumentBank;
pub use config::DatabankConfig;
pub use error::{BackendError, DatabankError, DatabankResult};
pub use schema::{Schema, TypeMapping};

// Re-export core traits
pub use core::{Databank, DocumentStream, SearchStream, StoreClient, StoreCollection, StoreSession};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
