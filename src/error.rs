//! Error types for content operations.
//!
//! Errors are split by layer: [`FieldError`] and [`ValidationErrorSet`] describe
//! per-field validation failures, [`MergeError`] covers schema synchronisation, and
//! [`ContentError`] is the request-level error returned to callers.

use crate::schema::SchemaStoreError;
use crate::storage::StorageError;
use crate::sync::SourceError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Main error type for content operations.
///
/// Callers at the request boundary map these to responses with
/// [`ContentError::status_code`].
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No active schema exists for the requested content type
    #[error("Content type '{name}' not found or not active")]
    SchemaNotFound { name: String },

    /// One or more fields failed validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrorSet),

    /// Content document not found
    #[error("Content not found: {content_type} with ID {id}")]
    ContentNotFound { content_type: String, id: String },

    /// Malformed request input
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Schema store failure
    #[error("Schema store error: {0}")]
    SchemaStore(#[from] SchemaStoreError),

    /// Document store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Schema merge failure
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContentError {
    /// Create a schema not found error
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        Self::SchemaNotFound { name: name.into() }
    }

    /// Create a content not found error
    pub fn content_not_found(content_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::ContentNotFound {
            content_type: content_type.into(),
            id: id.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// HTTP status a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SchemaNotFound { .. } | Self::ContentNotFound { .. } => 404,
            Self::Validation(_) | Self::InvalidRequest { .. } | Self::Json(_) => 400,
            Self::SchemaStore(SchemaStoreError::NotFound { .. }) => 404,
            Self::SchemaStore(SchemaStoreError::DuplicateName { .. }) => 409,
            Self::SchemaStore(SchemaStoreError::InvalidDefinition(_)) => 400,
            Self::Storage(error) if error.is_invalid_input() => 400,
            Self::Storage(_) | Self::Merge(_) => 500,
        }
    }

    /// The per-field errors, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrorSet> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrorSet> for ContentError {
    fn from(errors: ValidationErrorSet) -> Self {
        Self::Validation(errors)
    }
}

/// Reason a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Required field absent, null or empty
    Required,
    /// Value could not be converted to the field type
    InvalidValue { reason: String },
    /// Email field without an `@`
    InvalidEmail,
    /// Select value outside the declared choices
    NotAChoice { allowed: Vec<String> },
    /// Configured default does not coerce to the field type
    InvalidDefault { reason: String },
}

/// A validation failure for one field.
///
/// The `Display` output is the user-facing message and always names the field's
/// display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field_name: String,
    pub display_name: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(
        field_name: impl Into<String>,
        display_name: impl Into<String>,
        kind: FieldErrorKind,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            display_name: display_name.into(),
            kind,
        }
    }

    /// Create a missing required field error
    pub fn required(field_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(field_name, display_name, FieldErrorKind::Required)
    }

    /// Create a type conversion error
    pub fn invalid_value(
        field_name: impl Into<String>,
        display_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(
            field_name,
            display_name,
            FieldErrorKind::InvalidValue {
                reason: reason.into(),
            },
        )
    }

    /// Human-readable message for this error.
    pub fn message(&self) -> String {
        let name = &self.display_name;
        match &self.kind {
            FieldErrorKind::Required => format!("{} is required", name),
            FieldErrorKind::InvalidValue { reason } => {
                format!("Invalid value for {}: {}", name, reason)
            }
            FieldErrorKind::InvalidEmail => format!("{} must be a valid email", name),
            FieldErrorKind::NotAChoice { allowed } => {
                format!("{} must be one of: {}", name, allowed.join(", "))
            }
            FieldErrorKind::InvalidDefault { reason } => {
                format!("Invalid default value for {}: {}", name, reason)
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for FieldError {}

/// All field errors from one validation pass, in field order (`ordered_fields`).
///
/// Serializes as a JSON object mapping field name to message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    errors: Vec<FieldError>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. A second error for the same field replaces the first.
    pub fn push(&mut self, error: FieldError) {
        if let Some(existing) = self
            .errors
            .iter_mut()
            .find(|e| e.field_name == error.field_name)
        {
            *existing = error;
        } else {
            self.errors.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Look up the error for a field.
    pub fn get(&self, field_name: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field_name == field_name)
    }

    pub fn contains(&self, field_name: &str) -> bool {
        self.get(field_name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Field names with errors, in field order.
    pub fn field_names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field_name.as_str()).collect()
    }

    /// Convert to a JSON object of `field -> message`.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .errors
            .iter()
            .map(|e| (e.field_name.clone(), serde_json::Value::String(e.message())))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for ValidationErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field_name, e.message()))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrorSet {}

impl Serialize for ValidationErrorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in &self.errors {
            map.serialize_entry(&error.field_name, &error.message())?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a ValidationErrorSet {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Errors from merging external table descriptors into the schema store.
///
/// Any of these aborts the whole batch; nothing from the batch is stored.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The external table source failed
    #[error("External table source failed: {0}")]
    Source(#[from] SourceError),

    /// A schema name was created concurrently between filtering and insertion
    #[error("Schema '{name}' already exists; batch aborted")]
    Conflict { name: String },

    /// Other schema store failure
    #[error("Schema store failed during merge: {message}")]
    Store { message: String },
}

impl From<SchemaStoreError> for MergeError {
    fn from(error: SchemaStoreError) -> Self {
        match error {
            SchemaStoreError::DuplicateName { name } => Self::Conflict { name },
            other => Self::Store {
                message: other.to_string(),
            },
        }
    }
}

// Result type aliases for convenience
pub type ContentResult<T> = Result<T, ContentError>;
pub type ValidationResult<T> = Result<T, ValidationErrorSet>;
pub type MergeResult<T> = Result<T, MergeError>;
