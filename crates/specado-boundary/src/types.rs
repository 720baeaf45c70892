//! Type descriptors asserted against resolved values

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Expected type of an attribute value or of a nested element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// Text
    #[serde(alias = "string")]
    String,
    /// Any number, integral or not
    #[serde(alias = "numeric", alias = "number", alias = "Number")]
    Numeric,
    /// Numbers without a fractional representation
    #[serde(alias = "integer")]
    Integer,
    /// Floating point numbers
    #[serde(alias = "float")]
    Float,
    /// Either boolean literal
    #[serde(alias = "boolean", alias = "bool")]
    Boolean,
    /// Number, text or boolean
    #[serde(alias = "scalar")]
    Scalar,
    /// Mapping
    #[serde(alias = "hash", alias = "object", alias = "Object")]
    Hash,
    /// Sequence
    #[serde(alias = "array")]
    Array,
}

impl TypeTag {
    /// Check whether a value is an instance of this type
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeTag::String => value.is_string(),
            TypeTag::Numeric => value.is_number(),
            TypeTag::Integer => value.is_i64() || value.is_u64(),
            TypeTag::Float => value.is_f64(),
            TypeTag::Boolean => value.is_boolean(),
            TypeTag::Scalar => value.is_number() || value.is_string() || value.is_boolean(),
            TypeTag::Hash => value.is_object(),
            TypeTag::Array => value.is_array(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::String => write!(f, "String"),
            TypeTag::Numeric => write!(f, "Numeric"),
            TypeTag::Integer => write!(f, "Integer"),
            TypeTag::Float => write!(f, "Float"),
            TypeTag::Boolean => write!(f, "Boolean"),
            TypeTag::Scalar => write!(f, "Numeric, String or Boolean"),
            TypeTag::Hash => write!(f, "Hash"),
            TypeTag::Array => write!(f, "Array"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_matches_both_literals() {
        assert!(TypeTag::Boolean.matches(&json!(true)));
        assert!(TypeTag::Boolean.matches(&json!(false)));
        assert!(!TypeTag::Boolean.matches(&json!("true")));
        assert!(!TypeTag::Boolean.matches(&json!(0)));
    }

    #[test]
    fn test_numeric_kinds() {
        assert!(TypeTag::Numeric.matches(&json!(12)));
        assert!(TypeTag::Numeric.matches(&json!(20.01)));
        assert!(TypeTag::Integer.matches(&json!(1414173164)));
        assert!(!TypeTag::Integer.matches(&json!(1.5)));
        assert!(TypeTag::Float.matches(&json!(1.5)));
        assert!(!TypeTag::Numeric.matches(&json!("12")));
    }

    #[test]
    fn test_scalar_rejects_containers() {
        assert!(TypeTag::Scalar.matches(&json!("x")));
        assert!(!TypeTag::Scalar.matches(&json!({"nested": "value"})));
        assert!(!TypeTag::Scalar.matches(&json!(["array value"])));
        assert!(!TypeTag::Scalar.matches(&Value::Null));
    }

    #[test]
    fn test_deserialize_aliases() {
        let tag: TypeTag = serde_json::from_value(json!("bool")).unwrap();
        assert_eq!(tag, TypeTag::Boolean);
        let tag: TypeTag = serde_json::from_value(json!("Numeric")).unwrap();
        assert_eq!(tag, TypeTag::Numeric);
    }
}
