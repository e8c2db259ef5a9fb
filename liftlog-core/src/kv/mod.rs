//! Key-value persistence substrate.
//!
//! Every durable value in LiftLog lives under a single string key of a
//! [`KeyValueStore`]. Values are opaque strings; callers own their encoding.

mod file;
mod memory;
#[cfg(test)]
pub(crate) mod testing;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a key-value backend.
#[derive(Debug, Error)]
pub enum KvError {
    /// I/O error reading or writing a file.
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The key cannot be stored by this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Any other backend failure (database, platform storage).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Asynchronous string key-value store.
///
/// `remove` of an absent key succeeds.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    async fn remove(&self, key: &str) -> Result<(), KvError>;
}
