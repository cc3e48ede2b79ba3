use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Object key that marks a raw source expression in JSON or YAML input:
/// `{"$expression": "api => api.cache(true)"}`.
pub const EXPRESSION_KEY: &str = "$expression";

/// Insertion ordered manifest object.
pub type ManifestMap = IndexMap<String, ManifestValue>;

/// A manifest value.
///
/// Everything except `Expression` maps 1:1 onto JSON. `Expression` holds
/// source text (a function, a `require(...)` call) that JSON cannot carry and
/// that config files must reproduce verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<ManifestValue>),
    Object(ManifestMap),
    Expression(String),
}

impl ManifestValue {
    pub fn expression(source: impl Into<String>) -> Self {
        ManifestValue::Expression(source.into())
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ManifestValue::Object(_))
    }

    pub fn as_object(&self) -> Option<&ManifestMap> {
        match self {
            ManifestValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ManifestValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Follows a `.` separated path through nested objects.
    pub fn pointer(&self, path: &str) -> Option<&ManifestValue> {
        path.split('.').try_fold(self, |value, key| value.as_object()?.get(key))
    }

    /// Whether this value or any nested value is an `Expression`.
    pub fn contains_expression(&self) -> bool {
        match self {
            ManifestValue::Expression(_) => true,
            ManifestValue::Array(items) => items.iter().any(Self::contains_expression),
            ManifestValue::Object(map) => map.values().any(Self::contains_expression),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for ManifestValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ManifestValue::Null,
            serde_json::Value::Bool(b) => ManifestValue::Bool(b),
            serde_json::Value::Number(n) => ManifestValue::Number(n),
            serde_json::Value::String(s) => ManifestValue::String(s),
            serde_json::Value::Array(items) => {
                ManifestValue::Array(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(serde_json::Value::String(source)) = map.get(EXPRESSION_KEY) {
                        return ManifestValue::Expression(source.clone());
                    }
                }
                ManifestValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for ManifestValue {
    fn from(s: &str) -> Self {
        ManifestValue::String(s.to_string())
    }
}

impl From<String> for ManifestValue {
    fn from(s: String) -> Self {
        ManifestValue::String(s)
    }
}

impl From<bool> for ManifestValue {
    fn from(b: bool) -> Self {
        ManifestValue::Bool(b)
    }
}

impl From<ManifestMap> for ManifestValue {
    fn from(map: ManifestMap) -> Self {
        ManifestValue::Object(map)
    }
}

/// Converts a JSON object into a manifest map. Non-object values give an empty map.
pub fn manifest_from_json(value: serde_json::Value) -> ManifestMap {
    match ManifestValue::from(value) {
        ManifestValue::Object(map) => map,
        _ => ManifestMap::new(),
    }
}

// Expressions have no JSON form; they are written as their source string.
impl Serialize for ManifestValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ManifestValue::Null => serializer.serialize_unit(),
            ManifestValue::Bool(b) => serializer.serialize_bool(*b),
            ManifestValue::Number(n) => n.serialize(serializer),
            ManifestValue::String(s) => serializer.serialize_str(s),
            ManifestValue::Array(items) => items.serialize(serializer),
            ManifestValue::Object(map) => map.serialize(serializer),
            ManifestValue::Expression(source) => serializer.serialize_str(source),
        }
    }
}

impl<'de> Deserialize<'de> for ManifestValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Into::into)
    }
}
