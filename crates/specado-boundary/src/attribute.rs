//! Attribute specifications and their declaration options
//!
//! An [`AttributeSpec`] is the immutable record produced by a declaration: it
//! names the output key, where to read the raw value from, and which pipeline
//! stages apply to it.

use crate::types::TypeTag;
use serde_json::Value;

/// Nested-structure filter applied to a raw value before defaulting
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Nested {
    /// No nested filtering
    #[default]
    None,
    /// Whitelisted mapping with a declared type per key
    TypedHash(Vec<(String, TypeTag)>),
    /// Mapping of scalar values, unfiltered by key
    ScalarHash,
    /// Sequence whose elements all share one type
    TypedArray(TypeTag),
}

impl Nested {
    /// Check whether a nested filter is declared
    pub fn is_none(&self) -> bool {
        matches!(self, Nested::None)
    }
}

/// Declared attribute, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    /// Output key
    pub name: String,
    /// Whether absence of the raw value is a failure
    pub required: bool,
    /// Key or accessor used to locate the raw value
    pub source_name: String,
    /// Fallback for absent values and empty mappings
    pub default_value: Option<Value>,
    /// Type asserted against the final value
    pub expected_type: Option<TypeTag>,
    /// Nested-structure filter
    pub nested: Nested,
    /// Convert the final value to text
    pub stringify: bool,
}

impl AttributeSpec {
    /// Whether the raw value is read from a different key than the output key
    pub fn is_renamed(&self) -> bool {
        self.source_name != self.name
    }
}

/// Fluent options for declaring an attribute
///
/// Only one nested filter can apply to an attribute; calling a second nested
/// option replaces the first.
#[derive(Debug, Clone, Default)]
pub struct AttributeOptions {
    rename: Option<String>,
    default_value: Option<Value>,
    expected_type: Option<TypeTag>,
    nested: Nested,
    stringify: bool,
}

impl AttributeOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the raw value from `source` instead of the attribute name
    pub fn rename(mut self, source: impl Into<String>) -> Self {
        self.rename = Some(source.into());
        self
    }

    /// Substitute `value` when the resolved value is absent or an empty mapping
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Assert the final value is of `tag`
    pub fn of_type(mut self, tag: TypeTag) -> Self {
        self.expected_type = Some(tag);
        self
    }

    /// Convert the final value to its textual representation
    pub fn stringify(mut self) -> Self {
        self.stringify = true;
        self
    }

    /// Keep only the listed keys of a mapping, asserting each one's type
    pub fn typed_hash<I, K>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, TypeTag)>,
        K: Into<String>,
    {
        self.nested = Nested::TypedHash(
            fields
                .into_iter()
                .map(|(key, tag)| (key.into(), tag))
                .collect(),
        );
        self
    }

    /// Accept a mapping whose values are all scalars
    pub fn scalar_hash(mut self) -> Self {
        self.nested = Nested::ScalarHash;
        self
    }

    /// Accept a sequence whose elements are all of `tag`
    pub fn typed_array(mut self, tag: TypeTag) -> Self {
        self.nested = Nested::TypedArray(tag);
        self
    }

    pub(crate) fn into_spec(self, name: String, required: bool) -> AttributeSpec {
        let source_name = self.rename.unwrap_or_else(|| name.clone());
        AttributeSpec {
            name,
            required,
            source_name,
            default_value: self.default_value,
            expected_type: self.expected_type,
            nested: self.nested,
            stringify: self.stringify,
        }
    }
}
