use crate::core::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single fetched record. Column order is whatever the executor yielded and
/// carries no meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub field_values: Vec<FieldValue>,
}

impl Row {
    pub fn new(field_values: Vec<FieldValue>) -> Self {
        Row { field_values }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values.iter().find(|f| f.name == field)
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .map(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    pub fn len(&self) -> usize {
        self.field_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row::new(
            iter.into_iter()
                .map(|(name, value)| FieldValue::new(name, value))
                .collect(),
        )
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Row {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect()
    }
}
