//! In-memory document store.
//!
//! Keeps every collection as an insertion-ordered vector behind a mutex.
//! Used by the test suites and for running the server without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{DocumentStore, StoreError, strip_identity};

type Collections = HashMap<String, Vec<(String, Value)>>;

/// Document store holding everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Collections> {
        // The mutex is never held across an await point, and a poisoned
        // lock means a panic already happened in another test thread.
        self.inner.lock().expect("memory store mutex poisoned")
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, doc: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let doc = strip_identity(doc);

        self.lock()
            .entry(collection.to_owned())
            .or_default()
            .push((id.clone(), doc));

        Ok(id)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let guard = self.lock();
        let doc = guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(_, doc)| doc.clone());

        Ok(doc)
    }

    async fn replace(&self, collection: &str, id: &str, doc: Value) -> Result<bool, StoreError> {
        let doc = strip_identity(doc);
        let mut guard = self.lock();

        let Some(docs) = guard.get_mut(collection) else {
            return Ok(false);
        };
        match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            Some(slot) => {
                slot.1 = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, collection: &str, limit: i64) -> Result<Vec<(String, Value)>, StoreError> {
        let guard = self.lock();
        let limit = usize::try_from(limit).unwrap_or(0);
        let docs = guard
            .get(collection)
            .map(|docs| docs.iter().take(limit).cloned().collect())
            .unwrap_or_default();

        Ok(docs)
    }

    async fn count(&self, collection: &str) -> Result<i64, StoreError> {
        let guard = self.lock();
        let count = guard.get(collection).map_or(0, Vec::len);

        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError> {
        let mut guard = self.lock();
        let deleted = guard
            .get_mut(collection)
            .map_or(0, |docs| std::mem::take(docs).len());

        Ok(deleted as u64)
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let guard = self.lock();
        let mut names: Vec<String> = guard
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names.truncate(10);

        Ok(names)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryStore::new();
        let id = store
            .insert("product", json!({"name": "Noir Bar"}))
            .await
            .expect("insert");

        let doc = store.find_by_id("product", &id).await.expect("find");
        assert_eq!(doc, Some(json!({"name": "Noir Bar"})));
    }

    #[tokio::test]
    async fn test_insert_strips_identity_field() {
        let store = MemoryStore::new();
        let id = store
            .insert("product", json!({"id": "client-supplied", "name": "Bar"}))
            .await
            .expect("insert");

        assert_ne!(id, "client-supplied");
        let doc = store.find_by_id("product", &id).await.expect("find");
        assert_eq!(doc, Some(json!({"name": "Bar"})));
    }

    #[tokio::test]
    async fn test_find_unknown_id_is_none() {
        let store = MemoryStore::new();
        let doc = store
            .find_by_id("product", "no-such-id")
            .await
            .expect("find");
        assert_eq!(doc, None);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryStore::new();
        let first = store.insert("product", json!({"n": 1})).await.expect("insert");
        let second = store.insert("product", json!({"n": 2})).await.expect("insert");

        let docs = store.list("product", 100).await.expect("list");
        let ids: Vec<&str> = docs.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let store = MemoryStore::new();
        for n in 0..5 {
            store.insert("product", json!({"n": n})).await.expect("insert");
        }

        let docs = store.list("product", 3).await.expect("list");
        assert_eq!(docs.len(), 3);
    }

    #[tokio::test]
    async fn test_replace_existing() {
        let store = MemoryStore::new();
        let id = store.insert("order", json!({"status": "pending"})).await.expect("insert");

        let replaced = store
            .replace("order", &id, json!({"status": "paid"}))
            .await
            .expect("replace");
        assert!(replaced);

        let doc = store.find_by_id("order", &id).await.expect("find");
        assert_eq!(doc, Some(json!({"status": "paid"})));
    }

    #[tokio::test]
    async fn test_replace_missing_is_false() {
        let store = MemoryStore::new();
        let replaced = store
            .replace("order", "missing", json!({}))
            .await
            .expect("replace");
        assert!(!replaced);
    }

    #[tokio::test]
    async fn test_count_and_delete_all() {
        let store = MemoryStore::new();
        store.insert("product", json!({})).await.expect("insert");
        store.insert("product", json!({})).await.expect("insert");
        assert_eq!(store.count("product").await.expect("count"), 2);

        let deleted = store.delete_all("product").await.expect("delete");
        assert_eq!(deleted, 2);
        assert_eq!(store.count("product").await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_collection_names_skips_emptied_collections() {
        let store = MemoryStore::new();
        store.insert("product", json!({})).await.expect("insert");
        store.insert("order", json!({})).await.expect("insert");
        store.delete_all("order").await.expect("delete");

        let names = store.collection_names().await.expect("names");
        assert_eq!(names, vec!["product".to_owned()]);
    }
}
