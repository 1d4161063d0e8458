//! Output of a successful validation pass.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schema-conformant record: declared field name to normalized value.
///
/// Contains only fields the schema declares that were present, required or
/// defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRecord(Map<String, Value>);

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field_name: impl Into<String>, value: Value) {
        self.0.insert(field_name.into(), value);
    }

    pub fn get(&self, field_name: &str) -> Option<&Value> {
        self.0.get(field_name)
    }

    pub fn contains_key(&self, field_name: &str) -> bool {
        self.0.contains_key(field_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<NormalizedRecord> for Value {
    fn from(record: NormalizedRecord) -> Self {
        Value::Object(record.0)
    }
}

impl IntoIterator for NormalizedRecord {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
