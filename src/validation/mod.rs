//! Validation of raw content against runtime-defined schemas.
//!
//! - [`coercion`] - per-field-type coercion rules
//! - [`engine`] - schema resolution and error aggregation
//!
//! # Examples
//!
//! ```rust
//! use dynamic_content::schema::{ContentTypeSchema, FieldDefinition, FieldType, InMemorySchemaStore};
//! use dynamic_content::validation::ValidationEngine;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = ContentTypeSchema::new("blog_post", "Blog Post")
//!     .with_field(FieldDefinition::new("title", "Title", FieldType::Text).required())
//!     .with_field(FieldDefinition::new("age", "Age", FieldType::Number).required());
//! let engine = ValidationEngine::new(InMemorySchemaStore::with_schemas([schema]));
//!
//! let error = engine.validate("blog_post", &json!({})).await.unwrap_err();
//! assert_eq!(error.validation_errors().map(|e| e.len()), Some(2));
//! # Ok(())
//! # }
//! ```

pub mod coercion;
pub mod engine;
pub mod record;

pub use coercion::{Coercion, coerce};
pub use engine::{ValidationEngine, validate_record, validate_value};
pub use record::NormalizedRecord;

/// How an optional field's default value enters the normalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultPolicy {
    /// Run the default through the field's coercion rule, like supplied input
    #[default]
    Coerce,
    /// Insert the stored default string unchanged
    Verbatim,
}

/// Validation engine settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    pub default_policy: DefaultPolicy,
}
