//! Structural checks for schema definitions.
//!
//! These run before a schema is stored and are also what the `schema-validator`
//! binary applies to schema files. They guard the assumptions the validation
//! engine makes: names are well formed, field names are unique and select
//! fields carry choices.

use super::types::{ContentTypeSchema, FieldType};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum length of schema and field names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Keys written by the document store next to the content fields.
pub const RESERVED_FIELD_NAMES: [&str; 4] = ["id", "content_type", "created_at", "updated_at"];

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid name pattern"));

/// A schema definition that breaks a structural rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error(
        "Invalid name '{name}': must start with a lowercase letter and contain only lowercase letters, numbers, and underscores"
    )]
    InvalidName { name: String },

    #[error("Name '{name}' exceeds 100 characters")]
    NameTooLong { name: String },

    #[error("Schema '{schema}' has an empty display name")]
    MissingDisplayName { schema: String },

    #[error("Invalid field name '{field}' in schema '{schema}'")]
    InvalidFieldName { schema: String, field: String },

    #[error("Field name '{field}' is reserved")]
    ReservedFieldName { field: String },

    #[error("Duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    #[error("Select field '{field}' declares no choices")]
    MissingChoices { field: String },

    #[error("Select field '{field}' declares choice '{value}' more than once")]
    DuplicateChoice { field: String, value: String },
}

/// Whether `name` satisfies the schema/field naming rule.
pub fn is_valid_name(name: &str) -> bool {
    name.len() <= MAX_NAME_LENGTH && NAME_PATTERN.is_match(name)
}

fn check_name(name: &str) -> Result<(), DefinitionError> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(DefinitionError::NameTooLong {
            name: name.to_string(),
        });
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(DefinitionError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Check a schema definition, returning the first violation found.
pub fn check_definition(schema: &ContentTypeSchema) -> Result<(), DefinitionError> {
    check_name(&schema.name)?;

    if schema.display_name.trim().is_empty() {
        return Err(DefinitionError::MissingDisplayName {
            schema: schema.name.clone(),
        });
    }

    let mut seen = HashSet::new();
    for field in &schema.fields {
        if !is_valid_name(&field.field_name) {
            return Err(DefinitionError::InvalidFieldName {
                schema: schema.name.clone(),
                field: field.field_name.clone(),
            });
        }
        if RESERVED_FIELD_NAMES.contains(&field.field_name.as_str()) {
            return Err(DefinitionError::ReservedFieldName {
                field: field.field_name.clone(),
            });
        }
        if !seen.insert(field.field_name.as_str()) {
            return Err(DefinitionError::DuplicateField {
                schema: schema.name.clone(),
                field: field.field_name.clone(),
            });
        }
        if field.field_type == FieldType::Select {
            if field.choices.is_empty() {
                return Err(DefinitionError::MissingChoices {
                    field: field.field_name.clone(),
                });
            }
            let mut values = HashSet::new();
            for choice in &field.choices {
                if !values.insert(choice.value.as_str()) {
                    return Err(DefinitionError::DuplicateChoice {
                        field: field.field_name.clone(),
                        value: choice.value.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}
