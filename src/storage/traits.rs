//! Store traits and error types
//!
//! This module defines the key/value interface the configuration is persisted
//! through, and its error type.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Corrupt store snapshot: {0}")]
    Corrupt(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Key/value store holding persisted configuration blobs
///
/// Values are opaque JSON; the store never interprets them.
pub trait ConfigStore {
    /// Reads the value under `key`, if any
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Writes `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: Value) -> StoreResult<()>;

    /// Removes `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}
