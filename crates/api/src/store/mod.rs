//! Document store adapter.
//!
//! The persistence layer is a schemaless document store: records are JSON
//! bodies addressed by a store-generated unique identifier, grouped into
//! named collections. [`DocumentStore`] is the seam the services depend on;
//! [`PgDocumentStore`] backs it with a Postgres JSONB table and
//! [`MemoryStore`] provides a database-free implementation for tests and
//! local development.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Collection names used by this workspace.
pub mod collections {
    pub const PRODUCT: &str = "product";
    pub const ORDER: &str = "order";
}

/// Error type for document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Create/read/replace operations over named collections of JSON documents.
///
/// Identifiers are opaque strings assigned by the store on insert. A caller
/// that needs the full stored shape after an insert is responsible for
/// re-fetching by the returned id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a document and return its newly assigned identifier.
    ///
    /// Any top-level `id` field inside the body is dropped; identity lives
    /// outside the document.
    async fn insert(&self, collection: &str, doc: Value) -> Result<String, StoreError>;

    /// Fetch a document by id.
    ///
    /// Returns `Ok(None)` both for absent documents and for ids the store
    /// cannot address (malformed ids are indistinguishable from missing
    /// documents to callers).
    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Overwrite a document in full. Returns whether a document existed.
    async fn replace(&self, collection: &str, id: &str, doc: Value) -> Result<bool, StoreError>;

    /// List up to `limit` documents with their ids, in insertion order.
    async fn list(&self, collection: &str, limit: i64) -> Result<Vec<(String, Value)>, StoreError>;

    /// Count the documents in a collection.
    async fn count(&self, collection: &str) -> Result<i64, StoreError>;

    /// Delete every document in a collection, returning how many went away.
    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError>;

    /// Names of the first few non-empty collections, for diagnostics.
    async fn collection_names(&self) -> Result<Vec<String>, StoreError>;

    /// Connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Drop a top-level `id` key from a document body, if present.
pub(crate) fn strip_identity(mut doc: Value) -> Value {
    if let Some(obj) = doc.as_object_mut() {
        obj.remove("id");
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_identity_removes_id() {
        let doc = strip_identity(json!({"id": "abc", "name": "Noir Bar"}));
        assert_eq!(doc, json!({"name": "Noir Bar"}));
    }

    #[test]
    fn test_strip_identity_leaves_non_objects() {
        let doc = strip_identity(json!([1, 2, 3]));
        assert_eq!(doc, json!([1, 2, 3]));
    }
}
