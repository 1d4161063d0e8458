//! Fluent builders for schemas and raw records.

use dynamic_content::schema::{ContentTypeSchema, FieldDefinition, FieldType};
use serde_json::{Map, Value};

/// Builder for content type schemas.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema: ContentTypeSchema,
}

impl SchemaBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            schema: ContentTypeSchema::new(name, name.replace('_', " ")),
        }
    }

    pub fn field(mut self, name: &str, field_type: FieldType) -> Self {
        self.schema = self
            .schema
            .with_field(FieldDefinition::new(name, display(name), field_type));
        self
    }

    pub fn required(mut self, name: &str, field_type: FieldType) -> Self {
        self.schema = self
            .schema
            .with_field(FieldDefinition::new(name, display(name), field_type).required());
        self
    }

    pub fn with_default(mut self, name: &str, field_type: FieldType, default: &str) -> Self {
        self.schema = self.schema.with_field(
            FieldDefinition::new(name, display(name), field_type).with_default(default),
        );
        self
    }

    pub fn select(mut self, name: &str, choices: &[&str]) -> Self {
        self.schema = self.schema.with_field(
            FieldDefinition::new(name, display(name), FieldType::Select)
                .with_choices(choices.iter().copied()),
        );
        self
    }

    pub fn inactive(mut self) -> Self {
        self.schema = self.schema.inactive();
        self
    }

    pub fn build(self) -> ContentTypeSchema {
        self.schema
    }
}

/// `blog_post` -> `Blog post`
fn display(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builder for raw JSON records.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    data: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn null(mut self, key: &str) -> Self {
        self.data.insert(key.to_string(), Value::Null);
        self
    }

    pub fn build_map(self) -> Map<String, Value> {
        self.data
    }

    pub fn build(self) -> Value {
        Value::Object(self.data)
    }
}
