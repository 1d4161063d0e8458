//! In-memory document store.
//!
//! Thread-safe implementation of [`DocumentStore`] using a `HashMap` of
//! collections behind a tokio `RwLock`. Intended for tests, development and
//! embedding where persistence is not required.
//!
//! * PUT/GET/DELETE: O(log n) per collection
//! * LIST with pagination: ordered by id, no re-sorting
//! * FIND_BY_FIELD: O(n) over the collection
//!
//! ```rust
//! use dynamic_content::storage::{DocumentKey, DocumentStore, InMemoryDocumentStore};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryDocumentStore::new();
//! store
//!     .put(
//!         DocumentKey::new("blog_post", "1"),
//!         json!({"title": "Hello", "author": {"name": "Ana"}}),
//!     )
//!     .await?;
//!
//! let found = store.find_by_field("blog_post", "author.name", "Ana").await?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::storage::{DocumentKey, DocumentStore, StorageError};
use log::trace;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory document store.
///
/// Structure: `collection` → `id` → `document`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    data: Arc<RwLock<HashMap<String, BTreeMap<String, Value>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for debugging and tests.
    pub async fn stats(&self) -> InMemoryStoreStats {
        let guard = self.data.read().await;
        InMemoryStoreStats {
            collection_count: guard.values().filter(|docs| !docs.is_empty()).count(),
            total_documents: guard.values().map(BTreeMap::len).sum(),
        }
    }

    /// Names of collections holding at least one document, sorted.
    pub async fn list_collections(&self) -> Vec<String> {
        let guard = self.data.read().await;
        let mut names: Vec<String> = guard
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Resolve a dot-notation path and render the target as a string.
    fn extract_field_value(document: &Value, path: &str) -> Option<String> {
        let mut current = document;
        for part in path.split('.') {
            current = match part.parse::<usize>() {
                Ok(index) => current.get(index)?,
                Err(_) => current.get(part)?,
            };
        }

        match current {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, key: DocumentKey, document: Value) -> Result<Value, StorageError> {
        if !document.is_object() {
            return Err(StorageError::invalid_data_with_cause(
                format!("cannot store {}", key),
                "document must be a JSON object",
            ));
        }

        let mut guard = self.data.write().await;
        guard
            .entry(key.collection().to_string())
            .or_default()
            .insert(key.id().to_string(), document.clone());
        trace!("Stored document {}", key);

        Ok(document)
    }

    async fn get(&self, key: DocumentKey) -> Result<Option<Value>, StorageError> {
        let guard = self.data.read().await;
        Ok(guard
            .get(key.collection())
            .and_then(|docs| docs.get(key.id()))
            .cloned())
    }

    async fn delete(&self, key: DocumentKey) -> Result<bool, StorageError> {
        let mut guard = self.data.write().await;
        let existed = guard
            .get_mut(key.collection())
            .is_some_and(|docs| docs.remove(key.id()).is_some());
        Ok(existed)
    }

    async fn list(
        &self,
        collection: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<(DocumentKey, Value)>, StorageError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let guard = self.data.read().await;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .skip(offset)
            .take(limit)
            .map(|(id, document)| (DocumentKey::new(collection, id), document.clone()))
            .collect())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<(DocumentKey, Value)>, StorageError> {
        if field.is_empty() {
            return Err(StorageError::invalid_query("empty field path", field));
        }

        let guard = self.data.read().await;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|(_, document)| {
                Self::extract_field_value(document, field).is_some_and(|found| found == value)
            })
            .map(|(id, document)| (DocumentKey::new(collection, id), document.clone()))
            .collect())
    }

    async fn exists(&self, key: DocumentKey) -> Result<bool, StorageError> {
        let guard = self.data.read().await;
        Ok(guard
            .get(key.collection())
            .is_some_and(|docs| docs.contains_key(key.id())))
    }

    async fn count(&self, collection: &str) -> Result<usize, StorageError> {
        let guard = self.data.read().await;
        Ok(guard.get(collection).map_or(0, BTreeMap::len))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.data.write().await.clear();
        Ok(())
    }
}

/// Snapshot of the in-memory store's size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryStoreStats {
    /// Collections holding at least one document
    pub collection_count: usize,
    pub total_documents: usize,
}
