//! Input adapters: the model an instance extracts attributes from
//!
//! A [`Model`] is either an ordered mapping or an object adapter implementing
//! [`Accessors`]. The adapter is chosen once, when the input is wrapped; every
//! lookup afterwards goes through [`Model::try_get`].

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Capability of object-shaped input: named accessors returning values
pub trait Accessors {
    /// Invoke the accessor `name`; `None` when no such accessor exists
    fn accessor(&self, name: &str) -> Option<Value>;
}

impl<F> Accessors for F
where
    F: Fn(&str) -> Option<Value>,
{
    fn accessor(&self, name: &str) -> Option<Value> {
        self(name)
    }
}

/// Accessor adapter over the serialized fields of a struct
#[derive(Debug, Clone)]
pub struct SerializedAccessors {
    fields: Map<String, Value>,
}

impl Accessors for SerializedAccessors {
    fn accessor(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

/// Read-only input wrapped by a model instance
pub enum Model {
    /// Ordered string-keyed mapping
    Mapping(Map<String, Value>),
    /// Object exposing named accessors
    Object(Box<dyn Accessors>),
}

impl Model {
    /// Wrap an empty mapping
    pub fn empty() -> Self {
        Model::Mapping(Map::new())
    }

    /// Wrap a mapping
    pub fn mapping(map: Map<String, Value>) -> Self {
        Model::Mapping(map)
    }

    /// Wrap an object adapter
    pub fn object<A>(accessors: A) -> Self
    where
        A: Accessors + 'static,
    {
        Model::Object(Box::new(accessors))
    }

    /// Wrap a JSON value; objects become mappings, `null` an empty mapping
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Model::Mapping(map)),
            Value::Null => Ok(Model::empty()),
            other => Err(Error::invalid_model(format!(
                "expected a mapping, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Build a mapping from key/value pairs, later keys overwriting earlier ones
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Model::Mapping(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Expose the serialized fields of a struct as accessors
    pub fn from_serialize<T>(source: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(source)? {
            Value::Object(fields) => Ok(Model::object(SerializedAccessors { fields })),
            other => Err(Error::invalid_model(format!(
                "expected a struct or map, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Fetch a located value: present and not `null`
    pub fn try_get(&self, name: &str) -> Option<Value> {
        let value = match self {
            Model::Mapping(map) => map.get(name).cloned(),
            Model::Object(accessors) => accessors.accessor(name),
        };
        value.filter(|value| !value.is_null())
    }

    /// Check whether `name` is located on the model
    pub fn is_located(&self, name: &str) -> bool {
        self.try_get(name).is_some()
    }

    /// First value among `names` that is located and not an empty mapping
    pub fn first_present(&self, names: &[&str]) -> Option<Value> {
        names
            .iter()
            .filter_map(|name| self.try_get(name))
            .find(|value| !matches!(value, Value::Object(map) if map.is_empty()))
    }

    /// The wrapped mapping, when the model is mapping-shaped
    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Model::Mapping(map) => Some(map),
            Model::Object(_) => None,
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::empty()
    }
}

impl From<Map<String, Value>> for Model {
    fn from(map: Map<String, Value>) -> Self {
        Model::Mapping(map)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            Model::Object(_) => f.write_str("Object(..)"),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
