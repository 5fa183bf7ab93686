//! Attribute environment implementation

use ruleforge_core::{CoreError, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute values for one evaluation
///
/// Supplied fresh per call; the evaluator only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    values: HashMap<String, Value>,
}

impl Attributes {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add an attribute
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set an attribute, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Look up an attribute
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether the attribute is present
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over name/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Build from a JSON object whose members are all scalars
    pub fn from_json(json: serde_json::Value) -> Result<Self, CoreError> {
        match json {
            serde_json::Value::Object(map) => {
                let mut values = HashMap::with_capacity(map.len());
                for (name, value) in map {
                    let value = Value::try_from(value).map_err(|e| {
                        CoreError::InvalidValue(format!("attribute '{}': {}", name, e))
                    })?;
                    values.insert(name, value);
                }
                Ok(Self { values })
            }
            other => Err(CoreError::InvalidValue(format!(
                "attributes must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<HashMap<String, Value>> for Attributes {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
