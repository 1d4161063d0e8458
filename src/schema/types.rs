//! Core schema type definitions for runtime-defined content types.
//!
//! A [`ContentTypeSchema`] is created by an administrator and describes one shape
//! of content through an ordered list of [`FieldDefinition`]s. The serde shape of
//! these types is the persisted and interchange format of a schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// An administrator-defined content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSchema {
    /// Unique lowercase identifier (e.g. "blog_post")
    pub name: String,
    /// Human-readable name (e.g. "Blog Post")
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Inactive schemas are invisible to validation and merging
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl ContentTypeSchema {
    /// Create an active schema with no fields.
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: String::new(),
            is_active: true,
            fields: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a field. Its `order` is set to its position when left at zero.
    pub fn with_field(mut self, mut field: FieldDefinition) -> Self {
        if field.order == 0 {
            field.order = self.fields.len() as i32;
        }
        self.fields.push(field);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Look up a field by name.
    pub fn field(&self, field_name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.field_name == field_name)
    }

    /// Fields sorted by their `order` attribute, ties kept in declaration order.
    pub fn ordered_fields(&self) -> Vec<&FieldDefinition> {
        let mut fields: Vec<&FieldDefinition> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.order);
        fields
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.is_required)
    }

    /// Public JSON description of the schema, as served to form renderers.
    pub fn describe(&self) -> Value {
        let fields: Vec<Value> = self
            .ordered_fields()
            .into_iter()
            .map(|field| {
                let mut entry = json!({
                    "name": field.field_name,
                    "display_name": field.display_name,
                    "type": field.field_type,
                    "required": field.is_required,
                    "help_text": field.help_text,
                    "default": field.default_value,
                });
                if field.field_type == FieldType::Select && !field.choices.is_empty() {
                    entry["options"] = json!(field.choices);
                }
                entry
            })
            .collect();

        json!({
            "name": self.name,
            "display_name": self.display_name,
            "description": self.description,
            "fields": fields,
        })
    }

    /// Listing summary with a field count instead of the fields.
    pub fn summary(&self) -> SchemaSummary {
        SchemaSummary {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
            field_count: self.fields.len(),
            created_at: self.created_at,
        }
    }
}

/// Short form of a schema used in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub is_active: bool,
    pub field_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One field of a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub field_name: String,
    pub display_name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub is_required: bool,
    /// Used only when the field is absent or empty and not required
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub help_text: String,
    /// Permitted values; meaningful for select fields only
    #[serde(default, deserialize_with = "deserialize_choices")]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub order: i32,
}

impl FieldDefinition {
    /// Create an optional field with no default.
    pub fn new(
        field_name: impl Into<String>,
        display_name: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            display_name: display_name.into(),
            field_type,
            is_required: false,
            default_value: None,
            help_text: String::new(),
            choices: Vec::new(),
            order: 0,
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    pub fn with_choices<I, C>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Whether `value` is one of the declared choice values.
    pub fn has_choice(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c.value == value)
    }

    /// Declared choice values in order.
    pub fn choice_values(&self) -> Vec<String> {
        self.choices.iter().map(|c| c.value.clone()).collect()
    }
}

/// The closed set of field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Email,
    Date,
    Boolean,
    Select,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Number,
        FieldType::Email,
        FieldType::Date,
        FieldType::Boolean,
        FieldType::Select,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Select => "select",
        }
    }

    /// Label shown in admin screens.
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Textarea => "Text Area",
            FieldType::Number => "Number",
            FieldType::Email => "Email",
            FieldType::Date => "Date",
            FieldType::Boolean => "Boolean",
            FieldType::Select => "Select",
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        Self::Text
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown field type '{}'", s))
    }
}

/// A permitted value of a select field.
///
/// Plain strings deserialize as a choice whose label equals its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        Self {
            label: value.clone(),
            value,
        }
    }
}

impl From<(&str, &str)> for Choice {
    fn from((value, label): (&str, &str)) -> Self {
        Self::new(value, label)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChoice {
    Plain(String),
    Pair {
        value: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl From<RawChoice> for Choice {
    fn from(raw: RawChoice) -> Self {
        match raw {
            RawChoice::Plain(value) => Choice::from(value),
            RawChoice::Pair { value, label } => Choice {
                label: label.unwrap_or_else(|| value.clone()),
                value,
            },
        }
    }
}

impl<'de> Deserialize<'de> for Choice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawChoice::deserialize(deserializer).map(Choice::from)
    }
}

/// `choices` may be absent, null or a list of strings / `{value, label}` objects.
fn deserialize_choices<'de, D>(deserializer: D) -> Result<Vec<Choice>, D::Error>
where
    D: Deserializer<'de>,
{
    let choices: Option<Vec<Choice>> = Option::deserialize(deserializer)?;
    Ok(choices.unwrap_or_default())
}
