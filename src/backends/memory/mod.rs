//! In-process memory backend.

mod client;

pub use client::{MemoryClient, MemoryCollection, MemorySession};

/// Adapter type over the in-process memory store.
pub type MemoryDatabank = crate::bank::DocumentBank<MemoryClient>;
