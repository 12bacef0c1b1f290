//! KeySpace trait and storage error types.

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing persisted records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be decoded.
    #[error("malformed record at '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key already holds a record of another kind.
    #[error("key '{key}' holds a record that is not a note")]
    Occupied { key: String },

    /// A record could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A flat, persisted key space of JSON values.
///
/// Notes share this space with any other data the extension keeps, so
/// readers must check what kind of record a key holds.
pub trait KeySpace {
    /// Returns the value stored at `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Stores `value` at `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value) -> StoreResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;

    /// Returns every entry in key order.
    fn entries(&self) -> StoreResult<Vec<(String, Value)>>;
}

impl<K: KeySpace + ?Sized> KeySpace for Box<K> {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn entries(&self) -> StoreResult<Vec<(String, Value)>> {
        (**self).entries()
    }
}
