//! Field coercion rules.
//!
//! One rule per [`FieldType`], each a pure function from a raw JSON value to a
//! normalized value or a [`FieldError`]. Nothing in here panics on bad input;
//! every conversion failure is returned as a field error.

use super::DefaultPolicy;
use crate::error::{FieldError, FieldErrorKind};
use crate::schema::{FieldDefinition, FieldType};
use serde_json::{Number, Value};

/// Outcome of coercing one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// Store this normalized value under the field name
    Value(Value),
    /// Optional field left empty with no default; leave it out of the record
    Omit,
}

/// Whether a raw value counts as absent: missing, `null` or `""`.
pub fn is_empty(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Coerce the raw value of one field, applying required/default handling.
pub fn coerce(
    field: &FieldDefinition,
    raw: Option<&Value>,
    policy: DefaultPolicy,
) -> Result<Coercion, FieldError> {
    let value = match raw {
        Some(value) if !is_empty(raw) => value,
        _ if field.is_required => {
            return Err(FieldError::required(&field.field_name, &field.display_name));
        }
        _ => {
            return match &field.default_value {
                Some(default) if !default.is_empty() => apply_default(field, default, policy),
                _ => Ok(Coercion::Omit),
            };
        }
    };

    coerce_present(field, value)
        .map(Coercion::Value)
        .map_err(|kind| FieldError::new(&field.field_name, &field.display_name, kind))
}

fn apply_default(
    field: &FieldDefinition,
    default: &str,
    policy: DefaultPolicy,
) -> Result<Coercion, FieldError> {
    let raw = Value::String(default.to_string());
    match policy {
        DefaultPolicy::Verbatim => Ok(Coercion::Value(raw)),
        DefaultPolicy::Coerce => coerce_present(field, &raw)
            .map(Coercion::Value)
            .map_err(|kind| {
                FieldError::new(
                    &field.field_name,
                    &field.display_name,
                    FieldErrorKind::InvalidDefault {
                        reason: default_reason(kind, default),
                    },
                )
            }),
    }
}

/// Reason text for a default that failed its own field's type rule.
fn default_reason(kind: FieldErrorKind, default: &str) -> String {
    match kind {
        FieldErrorKind::InvalidValue { reason } | FieldErrorKind::InvalidDefault { reason } => {
            reason
        }
        FieldErrorKind::InvalidEmail => format!("'{}' is not a valid email", default),
        FieldErrorKind::NotAChoice { allowed } => {
            format!("'{}' is not one of: {}", default, allowed.join(", "))
        }
        // a non-empty default is never reported as missing
        FieldErrorKind::Required => format!("'{}' is not a valid value", default),
    }
}

/// Type rule for a present (non-empty) value.
pub fn coerce_present(field: &FieldDefinition, value: &Value) -> Result<Value, FieldErrorKind> {
    match field.field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Date => Ok(Value::String(as_text(value))),
        FieldType::Number => coerce_number(value).map(Value::Number),
        FieldType::Boolean => Ok(Value::Bool(coerce_boolean(value))),
        FieldType::Email => {
            let text = as_text(value);
            if text.contains('@') {
                Ok(Value::String(text))
            } else {
                Err(FieldErrorKind::InvalidEmail)
            }
        }
        FieldType::Select => match value.as_str() {
            Some(choice) if field.has_choice(choice) => Ok(value.clone()),
            _ => Err(FieldErrorKind::NotAChoice {
                allowed: field.choice_values(),
            }),
        },
    }
}

/// Strings verbatim; anything else as its JSON text.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_number(value: &Value) -> Result<Number, FieldErrorKind> {
    let parsed = match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(format!("'{}' is not a number", n)))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(format!("'{}' is not a number", s)))?,
        other => {
            return Err(invalid(format!(
                "expected a number, got {}",
                json_type_name(other)
            )));
        }
    };

    Number::from_f64(parsed).ok_or_else(|| invalid(format!("'{}' is not a finite number", parsed)))
}

fn invalid(reason: String) -> FieldErrorKind {
    FieldErrorKind::InvalidValue { reason }
}

/// Booleans pass through; strings are true iff "true", "1" or "yes" (any case);
/// other values use truthiness.
pub fn coerce_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.to_lowercase().as_str(), "true" | "1" | "yes"),
        other => is_truthy(other),
    }
}

/// Generic truthiness: zero, empty and null are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
