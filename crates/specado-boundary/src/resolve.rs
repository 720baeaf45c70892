//! Resolution pipeline for a single attribute
//!
//! Stages run in a fixed order: locate, required check, nested filter,
//! default, type assertion, stringify. A default is therefore type checked
//! like any located value, and stringification only ever sees a value that
//! already passed its type assertion.

use crate::attribute::{AttributeSpec, Nested};
use crate::error::{Error, Result};
use crate::model::Model;
use crate::types::TypeTag;
use serde_json::{Map, Value};

/// Resolve one attribute against a model; `None` means absent
pub fn resolve(spec: &AttributeSpec, model: &Model) -> Result<Option<Value>> {
    let raw = model.try_get(&spec.source_name);

    if spec.required && raw.is_none() {
        return Err(Error::missing_attribute(&spec.name));
    }

    let value = filter_nested(&spec.nested, raw)?;
    let value = apply_default(value, spec.default_value.as_ref());
    let value = match spec.expected_type {
        Some(tag) => with_type(tag, value)?,
        None => value,
    };

    Ok(if spec.stringify {
        value.map(stringify)
    } else {
        value
    })
}

/// Assert a non-null value is of `tag`; absent values pass through
pub fn with_type(tag: TypeTag, value: Option<Value>) -> Result<Option<Value>> {
    match value {
        Some(value) if !value.is_null() && !tag.matches(&value) => Err(Error::bad_type(value, tag)),
        value => Ok(value),
    }
}

/// Apply a nested-structure filter to a raw value
pub fn filter_nested(nested: &Nested, raw: Option<Value>) -> Result<Option<Value>> {
    match nested {
        Nested::None => Ok(raw),
        Nested::TypedHash(fields) => typed_hash(fields, raw).map(|map| Some(Value::Object(map))),
        Nested::ScalarHash => scalar_hash(raw).map(|map| Some(Value::Object(map))),
        Nested::TypedArray(tag) => typed_array(*tag, raw).map(|items| Some(Value::Array(items))),
    }
}

/// Keep the declared keys of a mapping, asserting each value's type
///
/// Keys missing from the input, or set to `null`, are skipped. Undeclared keys
/// never reach the result.
pub fn typed_hash(fields: &[(String, TypeTag)], raw: Option<Value>) -> Result<Map<String, Value>> {
    let mut passed = expect_mapping(raw)?;
    let mut result = Map::new();

    for (key, tag) in fields {
        let value = match passed.remove(key) {
            Some(value) if !value.is_null() => value,
            _ => continue,
        };
        if !tag.matches(&value) {
            return Err(Error::bad_type(value, *tag));
        }
        result.insert(key.clone(), value);
    }

    Ok(result)
}

/// Accept a mapping whose values are all numbers, text or booleans
pub fn scalar_hash(raw: Option<Value>) -> Result<Map<String, Value>> {
    let passed = expect_mapping(raw)?;
    let mut result = Map::new();

    for (key, value) in passed {
        if !TypeTag::Scalar.matches(&value) {
            return Err(Error::bad_type(value, TypeTag::Scalar));
        }
        result.insert(key, value);
    }

    Ok(result)
}

/// Accept a sequence whose elements are all of `tag`, preserving order
pub fn typed_array(tag: TypeTag, raw: Option<Value>) -> Result<Vec<Value>> {
    let passed = match raw {
        None => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(Error::bad_type(other, TypeTag::Array)),
    };

    let mut result = Vec::with_capacity(passed.len());
    for value in passed {
        if !tag.matches(&value) {
            return Err(Error::bad_type(value, tag));
        }
        result.push(value);
    }

    Ok(result)
}

/// Textual representation of a resolved value
pub fn stringify(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(text),
        other => Value::String(other.to_string()),
    }
}

fn expect_mapping(raw: Option<Value>) -> Result<Map<String, Value>> {
    match raw {
        None => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(Error::bad_type(other, TypeTag::Hash)),
    }
}

fn apply_default(value: Option<Value>, default: Option<&Value>) -> Option<Value> {
    match default {
        Some(default) if is_empty_result(value.as_ref()) => Some(default.clone()),
        _ => value,
    }
}

fn is_empty_result(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}
