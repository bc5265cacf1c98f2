//! Typed view over a component's JSON-like attribute object

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Attribute object attached to a component configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, JsonValue>);

impl Attributes {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build attributes from a JSON value, which must be an object
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            other => Err(Error::Attribute(format!(
                "attributes must be an object, got {}",
                other
            ))),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.0.insert(field.into(), value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String attribute; `Ok(None)` when absent, error when present with another type
    pub fn string(&self, field: &str) -> Result<Option<&str>> {
        match self.0.get(field) {
            None => Ok(None),
            Some(JsonValue::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(Error::Attribute(format!("{} must be a string", field))),
        }
    }

    /// String attribute that must be present
    pub fn required_string(&self, field: &str) -> Result<&str> {
        self.string(field)?
            .ok_or_else(|| Error::Attribute(format!("missing required {} attribute", field)))
    }

    /// Numeric attribute; integers are widened to `f64`
    pub fn number(&self, field: &str) -> Result<Option<f64>> {
        match self.0.get(field) {
            None => Ok(None),
            Some(JsonValue::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| Error::Attribute(format!("{} must be a float", field))),
            Some(_) => Err(Error::Attribute(format!("{} must be a float", field))),
        }
    }
}

impl From<Map<String, JsonValue>> for Attributes {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}
