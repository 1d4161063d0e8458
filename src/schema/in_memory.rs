//! In-memory schema store.
//!
//! Thread-safe [`SchemaStore`] backed by a `BTreeMap` behind a tokio `RwLock`.
//! Name uniqueness is enforced under the write lock, so concurrent
//! `bulk_create` calls can never produce two schemas with the same name.

use super::definition::check_definition;
use super::registry::{SchemaStore, SchemaStoreError};
use super::types::ContentTypeSchema;
use chrono::Utc;
use log::{debug, trace};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory schema store keyed by schema name.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaStore {
    schemas: Arc<RwLock<BTreeMap<String, ContentTypeSchema>>>,
}

impl InMemorySchemaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with schemas, skipping definition checks.
    pub fn with_schemas(schemas: impl IntoIterator<Item = ContentTypeSchema>) -> Self {
        let map = schemas
            .into_iter()
            .map(|schema| (schema.name.clone(), stamp_new(schema)))
            .collect();
        Self {
            schemas: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored schemas, active or not.
    pub async fn len(&self) -> usize {
        self.schemas.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.schemas.read().await.is_empty()
    }
}

fn stamp_new(mut schema: ContentTypeSchema) -> ContentTypeSchema {
    let now = Utc::now();
    schema.created_at.get_or_insert(now);
    schema.updated_at = Some(now);
    schema
}

impl SchemaStore for InMemorySchemaStore {
    async fn get_active_schema(
        &self,
        name: &str,
    ) -> Result<Option<ContentTypeSchema>, SchemaStoreError> {
        let guard = self.schemas.read().await;
        Ok(guard.get(name).filter(|s| s.is_active).cloned())
    }

    async fn list_active_schemas(&self) -> Result<Vec<ContentTypeSchema>, SchemaStoreError> {
        let guard = self.schemas.read().await;
        Ok(guard.values().filter(|s| s.is_active).cloned().collect())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, SchemaStoreError> {
        Ok(self.schemas.read().await.contains_key(name))
    }

    async fn existing_names(&self) -> Result<HashSet<String>, SchemaStoreError> {
        Ok(self.schemas.read().await.keys().cloned().collect())
    }

    async fn bulk_create(&self, schemas: Vec<ContentTypeSchema>) -> Result<usize, SchemaStoreError> {
        for schema in &schemas {
            check_definition(schema)?;
        }

        let mut guard = self.schemas.write().await;

        let mut batch_names = HashSet::new();
        for schema in &schemas {
            if guard.contains_key(&schema.name) || !batch_names.insert(schema.name.as_str()) {
                debug!("Bulk create rejected: schema '{}' already exists", schema.name);
                return Err(SchemaStoreError::DuplicateName {
                    name: schema.name.clone(),
                });
            }
        }

        let count = schemas.len();
        for schema in schemas {
            trace!("Bulk create: inserting schema '{}'", schema.name);
            guard.insert(schema.name.clone(), stamp_new(schema));
        }
        Ok(count)
    }

    async fn create(&self, schema: ContentTypeSchema) -> Result<ContentTypeSchema, SchemaStoreError> {
        check_definition(&schema)?;

        let mut guard = self.schemas.write().await;
        if guard.contains_key(&schema.name) {
            return Err(SchemaStoreError::DuplicateName { name: schema.name });
        }

        let stored = stamp_new(schema);
        guard.insert(stored.name.clone(), stored.clone());
        debug!("Created schema '{}'", stored.name);
        Ok(stored)
    }

    async fn get(&self, name: &str) -> Result<Option<ContentTypeSchema>, SchemaStoreError> {
        Ok(self.schemas.read().await.get(name).cloned())
    }

    async fn update(&self, mut schema: ContentTypeSchema) -> Result<ContentTypeSchema, SchemaStoreError> {
        check_definition(&schema)?;

        let mut guard = self.schemas.write().await;
        let existing = guard
            .get(&schema.name)
            .ok_or_else(|| SchemaStoreError::NotFound {
                name: schema.name.clone(),
            })?;

        schema.created_at = existing.created_at;
        schema.updated_at = Some(Utc::now());
        guard.insert(schema.name.clone(), schema.clone());
        debug!("Updated schema '{}'", schema.name);
        Ok(schema)
    }

    async fn delete(&self, name: &str) -> Result<bool, SchemaStoreError> {
        let existed = self.schemas.write().await.remove(name).is_some();
        if existed {
            debug!("Deleted schema '{}'", name);
        }
        Ok(existed)
    }
}
