//! Idempotent schema merge.
//!
//! Turns external table descriptors into field-less content type schemas,
//! skipping every name the store already knows. All new schemas go into the
//! store in one atomic `bulk_create`; if another writer claims one of the names
//! in the meantime the whole batch fails and nothing is written.

use super::descriptor::TableDescriptor;
use super::source::TableSource;
use crate::error::{MergeError, MergeResult};
use crate::schema::SchemaStore;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Merges external tables into a schema store.
#[derive(Debug, Clone)]
pub struct SchemaMerger<S: SchemaStore> {
    store: S,
}

impl<S: SchemaStore> SchemaMerger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a schema for every descriptor whose derived name is not stored yet.
    ///
    /// Returns the number of schemas created; 0 when there was nothing new.
    /// Running it twice with the same input creates nothing the second time.
    ///
    /// # Errors
    ///
    /// - [`MergeError::Conflict`] if a name was taken concurrently
    /// - [`MergeError::Store`] for any other store failure
    pub async fn merge_external_tables(&self, descriptors: &[TableDescriptor]) -> MergeResult<usize> {
        let existing = self.store.existing_names().await?;

        let mut seen = HashSet::new();
        let mut schemas = Vec::new();
        for descriptor in descriptors {
            if descriptor.table_name.trim().is_empty() {
                warn!("Skipping external table with an empty table name");
                continue;
            }

            let name = descriptor.derived_name();
            if existing.contains(&name) {
                continue;
            }
            if !seen.insert(name.clone()) {
                debug!(
                    "Table '{}' maps to '{}' already in this batch; skipping",
                    descriptor.table_name, name
                );
                continue;
            }
            schemas.push(descriptor.to_schema());
        }

        if schemas.is_empty() {
            info!("No new content types to create");
            return Ok(0);
        }

        let created = self.store.bulk_create(schemas).await.map_err(|e| {
            let error = MergeError::from(e);
            warn!("Schema merge aborted: {}", error);
            error
        })?;

        info!("Created {} new content types", created);
        Ok(created)
    }

    /// Fetch tables from `source` and merge them.
    pub async fn sync<T: TableSource>(&self, source: &T) -> MergeResult<usize> {
        let tables = source.fetch_tables().await.map_err(|e| {
            warn!("Table source failed: {}", e);
            MergeError::Source(e)
        })?;
        debug!("Merging {} external tables", tables.len());
        self.merge_external_tables(&tables).await
    }
}
