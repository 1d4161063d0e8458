//! External table metadata.

use crate::schema::ContentTypeSchema;
use crate::schema::definition::MAX_NAME_LENGTH;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One table as reported by an external table-metadata source.
///
/// Only `table_name` and `title` feed the merge; the rest is carried so callers
/// can inspect what the source returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    pub table_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub meta: Value,
}

fn default_enabled() -> bool {
    true
}

/// Source ids show up as strings or integers depending on the backend version.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl TableDescriptor {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            id: None,
            table_name: table_name.into(),
            title: None,
            enabled: true,
            meta: Value::Null,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Schema name for this table.
    ///
    /// Lowercased, anything outside `[a-z0-9_]` replaced with `_`, prefixed
    /// with `t_` unless it starts with a letter, cut to the name length limit.
    pub fn derived_name(&self) -> String {
        let mut name: String = self
            .table_name
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'a'..='z' | '0'..='9' | '_' => c,
                _ => '_',
            })
            .collect();

        if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
            name.insert_str(0, "t_");
        }
        name.truncate(MAX_NAME_LENGTH);
        name
    }

    /// Title when it is non-blank, else the raw table name.
    pub fn display_name(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.table_name.clone(),
        }
    }

    /// Field-less, active schema for this table.
    pub fn to_schema(&self) -> ContentTypeSchema {
        ContentTypeSchema::new(self.derived_name(), self.display_name())
    }
}
