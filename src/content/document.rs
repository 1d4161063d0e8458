//! Stored content shapes.

use crate::validation::NormalizedRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One stored content instance.
///
/// Serializes flat: `{"id", "content_type", "created_at", "updated_at", ...fields}`
/// with RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub id: String,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ContentDocument {
    /// New document with a fresh v4 id.
    pub fn new(content_type: impl Into<String>, record: NormalizedRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            content_type: content_type.into(),
            created_at: now,
            updated_at: now,
            fields: record.into_map(),
        }
    }

    pub fn get(&self, field_name: &str) -> Option<&Value> {
        self.fields.get(field_name)
    }

    /// Overwrite fields present in `record`, keep the rest, bump `updated_at`.
    pub fn apply(&mut self, record: NormalizedRecord) {
        self.fields.extend(record);
        self.updated_at = Utc::now();
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

/// All documents of one content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentList {
    pub content_type: String,
    pub count: usize,
    pub results: Vec<ContentDocument>,
}

/// Document count for one active content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTypeOverview {
    pub content_type: String,
    pub display_name: String,
    pub count: usize,
}
