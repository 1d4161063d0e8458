//! Content type schemas and their storage.
//!
//! # Key Types
//!
//! - [`ContentTypeSchema`] - administrator-defined content shape
//! - [`FieldDefinition`] / [`FieldType`] - one typed field of a schema
//! - [`SchemaStore`] - registry contract used by validation, merge and content operations
//! - [`InMemorySchemaStore`] - thread-safe reference store
//!
//! # Examples
//!
//! ```rust
//! use dynamic_content::schema::{
//!     ContentTypeSchema, FieldDefinition, FieldType, InMemorySchemaStore, SchemaStore,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemorySchemaStore::new();
//! let schema = ContentTypeSchema::new("blog_post", "Blog Post")
//!     .with_field(FieldDefinition::new("title", "Title", FieldType::Text).required());
//! store.create(schema).await?;
//! assert!(store.get_active_schema("blog_post").await?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod definition;
pub mod in_memory;
pub mod registry;
pub mod types;


pub use definition::{DefinitionError, check_definition, is_valid_name};
pub use in_memory::InMemorySchemaStore;
pub use registry::{SchemaStore, SchemaStoreError};
pub use types::{Choice, ContentTypeSchema, FieldDefinition, FieldType, SchemaSummary};
