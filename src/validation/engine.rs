//! Validation engine.
//!
//! Resolves a content type through the [`SchemaStore`], runs the coercion rule of
//! every declared field over a raw record and aggregates the outcome. Either every
//! field coerces and a [`NormalizedRecord`] is returned, or the complete
//! [`ValidationErrorSet`] is returned and no normalized values escape.

use super::coercion::{Coercion, coerce};
use super::record::NormalizedRecord;
use super::ValidationConfig;
use crate::error::{ContentError, ContentResult, ValidationErrorSet, ValidationResult};
use crate::schema::{ContentTypeSchema, SchemaStore};
use log::{debug, trace};
use serde_json::{Map, Value};

/// Validate a raw record against a schema.
///
/// Fields are processed in their display order. Keys in `raw` that the schema does
/// not declare are dropped.
pub fn validate_record(
    schema: &ContentTypeSchema,
    raw: &Map<String, Value>,
    config: &ValidationConfig,
) -> ValidationResult<NormalizedRecord> {
    let mut record = NormalizedRecord::new();
    let mut errors = ValidationErrorSet::new();

    for field in schema.ordered_fields() {
        match coerce(field, raw.get(&field.field_name), config.default_policy) {
            Ok(Coercion::Value(value)) => record.insert(field.field_name.clone(), value),
            Ok(Coercion::Omit) => {}
            Err(error) => errors.push(error),
        }
    }

    if !errors.is_empty() {
        debug!(
            "Validation of '{}' failed with {} field error(s)",
            schema.name,
            errors.len()
        );
        return Err(errors);
    }

    for key in raw.keys().filter(|k| schema.field(k).is_none()) {
        trace!("Dropping undeclared key '{}' for '{}'", key, schema.name);
    }

    Ok(record)
}

/// Validate an arbitrary JSON value, which must be an object.
pub fn validate_value(
    schema: &ContentTypeSchema,
    raw: &Value,
    config: &ValidationConfig,
) -> ContentResult<NormalizedRecord> {
    let object = raw
        .as_object()
        .ok_or_else(|| ContentError::invalid_request("Content must be a JSON object"))?;
    Ok(validate_record(schema, object, config)?)
}

/// Validation engine bound to a schema store.
///
/// Stateless apart from the store handle; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct ValidationEngine<S: SchemaStore> {
    store: S,
    config: ValidationConfig,
}

impl<S: SchemaStore> ValidationEngine<S> {
    /// Create an engine with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ValidationConfig::default())
    }

    pub fn with_config(store: S, config: ValidationConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Resolve the active schema for a content type.
    pub async fn resolve(&self, schema_name: &str) -> ContentResult<ContentTypeSchema> {
        match self.store.get_active_schema(schema_name).await? {
            Some(schema) => Ok(schema),
            None => {
                debug!("No active schema named '{}'", schema_name);
                Err(ContentError::schema_not_found(schema_name))
            }
        }
    }

    /// Validate a raw record against the active schema `schema_name`.
    ///
    /// # Errors
    ///
    /// - [`ContentError::SchemaNotFound`] if no active schema has that name
    /// - [`ContentError::InvalidRequest`] if `raw` is not a JSON object
    /// - [`ContentError::Validation`] carrying every failing field
    pub async fn validate(&self, schema_name: &str, raw: &Value) -> ContentResult<NormalizedRecord> {
        let schema = self.resolve(schema_name).await?;
        validate_value(&schema, raw, &self.config)
    }
}
