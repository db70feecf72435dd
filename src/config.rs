//! Connection configuration.

use serde::{Deserialize, Serialize};

use crate::schema::Schema;

/// Configuration for opening a store session.
///
/// All fields have defaults suitable for a local development store, so a
/// plain `DatabankConfig::default()` connects to `localhost:27017/test`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabankConfig {
    /// Store host name (default: `"localhost"`).
    #[serde(default = "default_host")]
    pub host: String,

    /// Store port (default: `27017`).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Name of the database holding the collections (default: `"test"`).
    #[serde(default = "default_database")]
    pub database: String,

    /// Optional per-kind overrides of the identity column.
    #[serde(default)]
    pub schema: Schema,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    27017
}

fn default_database() -> String {
    "test".to_string()
}

impl Default for DatabankConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            schema: Schema::default(),
        }
    }
}

impl DatabankConfig {
    /// Creates a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the store port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Sets the identity schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }
}
