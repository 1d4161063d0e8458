//! Schema registry contract.
//!
//! The [`SchemaStore`] trait is the handle through which the validation engine,
//! the merge operation and the content service read schema definitions. It also
//! carries the administrative CRUD operations. Implementations own persistence;
//! callers never reach a store through global state.

use super::definition::DefinitionError;
use super::types::ContentTypeSchema;
use std::collections::HashSet;
use std::future::Future;

/// Errors returned by schema store implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaStoreError {
    /// No schema with this name exists
    #[error("Schema '{name}' not found")]
    NotFound { name: String },

    /// A schema with this name already exists (uniqueness constraint)
    #[error("Schema '{name}' already exists")]
    DuplicateName { name: String },

    /// The definition failed structural checks
    #[error("Invalid schema definition: {0}")]
    InvalidDefinition(#[from] DefinitionError),
}

/// Storage of content type schemas.
///
/// # Consistency
///
/// - Reads see a consistent snapshot per call.
/// - `bulk_create` is all-or-nothing. If any name in the batch already exists,
///   or occurs twice in the batch, nothing is written and
///   [`SchemaStoreError::DuplicateName`] is returned. The uniqueness check and
///   the insert must be atomic with respect to other writers.
/// - `create` and `update` run [`check_definition`](super::check_definition)
///   before writing.
pub trait SchemaStore: Send + Sync {
    /// Active schema with exactly this name.
    fn get_active_schema(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<ContentTypeSchema>, SchemaStoreError>> + Send;

    /// All active schemas, ordered by name.
    fn list_active_schemas(
        &self,
    ) -> impl Future<Output = Result<Vec<ContentTypeSchema>, SchemaStoreError>> + Send;

    /// Whether a schema with this name exists, active or not.
    fn exists_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<bool, SchemaStoreError>> + Send;

    /// Names of all stored schemas, active or not, read in one snapshot.
    fn existing_names(
        &self,
    ) -> impl Future<Output = Result<HashSet<String>, SchemaStoreError>> + Send;

    /// Insert a batch of new schemas atomically. Returns the number inserted.
    fn bulk_create(
        &self,
        schemas: Vec<ContentTypeSchema>,
    ) -> impl Future<Output = Result<usize, SchemaStoreError>> + Send;

    /// Insert one new schema and return it as stored.
    fn create(
        &self,
        schema: ContentTypeSchema,
    ) -> impl Future<Output = Result<ContentTypeSchema, SchemaStoreError>> + Send;

    /// Schema by name, active or not.
    fn get(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<ContentTypeSchema>, SchemaStoreError>> + Send;

    /// Replace an existing schema. The name cannot change.
    fn update(
        &self,
        schema: ContentTypeSchema,
    ) -> impl Future<Output = Result<ContentTypeSchema, SchemaStoreError>> + Send;

    /// Delete a schema. Returns `true` if it existed.
    fn delete(&self, name: &str) -> impl Future<Output = Result<bool, SchemaStoreError>> + Send;
}
