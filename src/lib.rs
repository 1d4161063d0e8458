//! Runtime-defined content types for Rust.
//!
//! Administrators define content schemas at runtime; clients submit content
//! that is validated against those schemas before it is stored as schemaless
//! documents. Schemas can also be synchronised from an external table-metadata
//! source.
//!
//! # Core Components
//!
//! - [`ValidationEngine`] - coerces raw records and aggregates every field error
//! - [`SchemaStore`] - content type registry
//! - [`ContentService`] - content lifecycle on top of a [`DocumentStore`]
//! - [`SchemaMerger`] - idempotent schema merge from a [`TableSource`]
//!
//! # Quick Start
//!
//! ```rust
//! use dynamic_content::{ContentError, ValidationEngine};
//! use dynamic_content::schema::{ContentTypeSchema, FieldDefinition, FieldType, InMemorySchemaStore};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = ContentTypeSchema::new("blog_post", "Blog Post")
//!     .with_field(FieldDefinition::new("title", "Title", FieldType::Text).required())
//!     .with_field(FieldDefinition::new("views", "Views", FieldType::Number).with_default("0"));
//! let engine = ValidationEngine::new(InMemorySchemaStore::with_schemas([schema]));
//!
//! let record = engine.validate("blog_post", &json!({"title": "Hello"})).await?;
//! assert_eq!(record.get("views"), Some(&json!(0.0)));
//!
//! let error = engine.validate("blog_post", &json!({})).await.unwrap_err();
//! assert!(matches!(error, ContentError::Validation(_)));
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod schema;
pub mod storage;
pub mod sync;
pub mod validation;

// Re-export commonly used types for convenience
pub use auth::{AuthProvider, AuthenticationError, Credentials, Principal, StaticTokenAuthenticator};
pub use config::{ConfigError, NocoDbConfig, ServerConfig};
pub use content::{ContentDocument, ContentService, RequestContext};
pub use error::{
    ContentError, ContentResult, FieldError, FieldErrorKind, MergeError, MergeResult,
    ValidationErrorSet, ValidationResult,
};
pub use schema::{
    ContentTypeSchema, FieldDefinition, FieldType, InMemorySchemaStore, SchemaStore,
    SchemaStoreError,
};
pub use storage::{DocumentKey, DocumentStore, InMemoryDocumentStore, StorageError};
pub use sync::{NocoDbClient, SchemaMerger, SourceError, TableDescriptor, TableSource};
pub use validation::{DefaultPolicy, NormalizedRecord, ValidationConfig, ValidationEngine};
