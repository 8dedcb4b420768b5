//! Persistent key-value storage for client state.
//!
//! The only durable client state is the cart identity pair; values are
//! opaque JSON strings to the store.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteKvStore, SqliteKvStoreConfig};

use async_trait::async_trait;

/// KeyValueStore abstracts the browser-storage-like persistence layer.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for a key, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores a value, replacing any previous one as a whole.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a key; removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// StorageError represents errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
