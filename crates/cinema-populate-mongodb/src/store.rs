//! Document store abstraction.
//!
//! Every operation receives the store explicitly. [`crate::MongoStore`] talks
//! to a MongoDB database; [`crate::MemoryStore`] keeps everything in process.

use async_trait::async_trait;
use bson::Document;
use cinema_core::IndexSpec;
use thiserror::Error;

/// Errors raised by a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// MongoDB connection or query error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// A write violated a unique index.
    #[error("Duplicate key on {collection}.{index}: {key}")]
    DuplicateKey {
        collection: String,
        index: String,
        key: String,
    },

    /// The collection already exists.
    #[error("Collection '{0}' already exists")]
    CollectionExists(String),

    /// The store refused a write.
    #[error("Write to '{collection}' rejected: {reason}")]
    WriteRejected { collection: String, reason: String },
}

/// Operations the seeding tools need from a document-oriented store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Names of the collections that currently exist.
    async fn collection_names(&self) -> Result<Vec<String>, StoreError>;

    /// Create an empty collection. Fails if it already exists.
    async fn create_collection(&self, name: &str) -> Result<(), StoreError>;

    /// Drop a collection and its indexes. Dropping a missing collection is a no-op.
    async fn drop_collection(&self, name: &str) -> Result<(), StoreError>;

    /// Number of documents in a collection, zero if it does not exist.
    async fn count_documents(&self, name: &str) -> Result<u64, StoreError>;

    /// Insert documents as one bulk write, returning how many were inserted.
    async fn insert_many(&self, name: &str, documents: Vec<Document>) -> Result<u64, StoreError>;

    /// Declare an index. Declaring an identical index twice is a no-op.
    async fn create_index(&self, index: &IndexSpec) -> Result<(), StoreError>;

    /// Whether a collection exists.
    async fn collection_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.collection_names().await?.iter().any(|n| n == name))
    }
}
