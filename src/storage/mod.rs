//! Document storage for validated content.
//!
//! The `DocumentStore` trait defines pure data operations on schemaless JSON
//! documents. It has no knowledge of content types, schemas or validation; the
//! content service decides what gets written and when.
//!
//! # Architecture
//!
//! The storage layer is responsible for:
//! - PUT/GET/DELETE of JSON documents
//! - Grouping documents into collections
//! - Exact-match lookups on a top-level or nested field
//!
//! It is NOT responsible for:
//! - Document ids and timestamps
//! - Schema validation
//! - Create vs. update semantics
//!
//! # Example Usage
//!
//! ```rust
//! use dynamic_content::storage::{DocumentKey, DocumentStore, InMemoryDocumentStore};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryDocumentStore::new();
//!
//! let key = DocumentKey::new("blog_post", "42");
//! store.put(key.clone(), json!({"title": "Hello"})).await?;
//!
//! assert!(store.get(key.clone()).await?.is_some());
//! assert!(store.delete(key).await?);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::StorageError;
pub use in_memory::{InMemoryDocumentStore, InMemoryStoreStats};

use serde_json::Value;
use std::fmt;
use std::future::Future;

/// Location of a document: `collection` → `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey {
    collection: String,
    id: String,
}

impl DocumentKey {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Schemaless document persistence.
///
/// PUT both creates and replaces. DELETE reports whether the document existed
/// so callers can tell "deleted" from "not found".
pub trait DocumentStore: Send + Sync {
    /// Store `document` at `key`, replacing anything already there, and return
    /// what was stored.
    fn put(
        &self,
        key: DocumentKey,
        document: Value,
    ) -> impl Future<Output = Result<Value, StorageError>> + Send;

    fn get(
        &self,
        key: DocumentKey,
    ) -> impl Future<Output = Result<Option<Value>, StorageError>> + Send;

    /// `true` if the document existed.
    fn delete(&self, key: DocumentKey) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// List a collection ordered by id.
    ///
    /// An `offset` past the end or a `limit` of 0 yields an empty vector.
    fn list(
        &self,
        collection: &str,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<(DocumentKey, Value)>, StorageError>> + Send;

    /// Documents whose `field` equals `value`.
    ///
    /// `field` may use dot notation for nested objects and array indexes
    /// (`"author.name"`, `"tags.0"`). Scalars are compared by their string form.
    fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> impl Future<Output = Result<Vec<(DocumentKey, Value)>, StorageError>> + Send;

    fn exists(&self, key: DocumentKey) -> impl Future<Output = Result<bool, StorageError>> + Send;

    fn count(&self, collection: &str) -> impl Future<Output = Result<usize, StorageError>> + Send;

    /// Remove every document from every collection.
    fn clear(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}
