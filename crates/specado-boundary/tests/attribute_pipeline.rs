//! Unit tests for attribute declaration and resolution
//!
//! Each test declares a small model class and checks the output mapping
//! produced for a given input, covering renames, defaults, type assertions,
//! stringification, required attributes, and nested structures.

use serde_json::{json, Value};
use specado_boundary::{
    AttributeOptions, AttributeSet, Error, Model, ModelClass, ModelInstance, TypeTag,
};

struct Dummy(AttributeSet);

impl ModelClass for Dummy {
    fn attributes(&self) -> &AttributeSet {
        &self.0
    }
}

fn declare(build: impl FnOnce(specado_boundary::AttributeSetBuilder) -> specado_boundary::AttributeSetBuilder) -> Dummy {
    Dummy(build(AttributeSet::builder()).build())
}

fn produce(class: Dummy, input: Value) -> specado_boundary::Result<Value> {
    let model = Model::from_value(input).unwrap();
    ModelInstance::new(class, model).to_map(false).map(Value::Object)
}

fn params() -> Value {
    json!({"c": "C", "num": 12})
}

#[cfg(test)]
mod plain_attributes {
    use super::*;

    #[test]
    fn test_reads_declared_keys_from_mapping() {
        let class = declare(|b| b.attribute("c", AttributeOptions::new()));
        assert_eq!(produce(class, params()).unwrap(), json!({"c": "C"}));
    }

    #[test]
    fn test_drops_non_listed_parameters() {
        let class = declare(|b| b.attribute("num", AttributeOptions::new()));
        let output = produce(class, json!({"num": 12, "other": "value"})).unwrap();
        assert_eq!(output, json!({"num": 12}));
    }

    #[test]
    fn test_round_trip_without_extra_keys() {
        let class = declare(|b| {
            b.attribute("a", AttributeOptions::new())
                .attribute("b", AttributeOptions::new().of_type(TypeTag::String))
        });
        assert_eq!(produce(class, json!({"a": 1, "b": "x"})).unwrap(), json!({"a": 1, "b": "x"}));
    }

    #[test]
    fn test_reads_from_object_accessors() {
        let class = declare(|b| b.attribute("a", AttributeOptions::new()));
        let model = Model::object(|name: &str| match name {
            "a" => Some(json!("a")),
            "b" => Some(json!(2)),
            _ => None,
        });
        let output = ModelInstance::new(class, model).to_map(false).unwrap();
        assert_eq!(Value::Object(output), json!({"a": "a"}));
    }

    #[test]
    fn test_output_follows_declaration_order() {
        let class = declare(|b| {
            b.attribute("z", AttributeOptions::new())
                .attribute("a", AttributeOptions::new())
                .attribute("m", AttributeOptions::new())
        });
        let model = Model::from_value(json!({"a": 1, "m": 2, "z": 3})).unwrap();
        let output = ModelInstance::new(class, model).to_map(false).unwrap();
        let keys: Vec<_> = output.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_declaration_keeps_model() {
        let class = declare(|b| b);
        let instance = ModelInstance::new(class, Model::from_value(params()).unwrap());
        assert_eq!(
            Value::Object(instance.model().as_mapping().unwrap().clone()),
            params()
        );
        assert!(instance.to_map(false).unwrap().is_empty());
    }
}

#[cfg(test)]
mod defaults_and_types {
    use super::*;

    #[test]
    fn test_default_when_absent() {
        let class = declare(|b| b.attribute("c", AttributeOptions::new().default_value("see")));
        assert_eq!(produce(class, json!({})).unwrap(), json!({"c": "see"}));
    }

    #[test]
    fn test_default_ignored_when_value_given() {
        let class = declare(|b| b.attribute("num", AttributeOptions::new().default_value(0)));
        assert_eq!(produce(class, params()).unwrap(), json!({"num": 12}));
    }

    #[test]
    fn test_boolean_defaults() {
        let class = declare(|b| {
            b.attribute(
                "truthy_val",
                AttributeOptions::new().of_type(TypeTag::Boolean).default_value(true),
            )
        });
        assert_eq!(produce(class, json!({})).unwrap(), json!({"truthy_val": true}));

        let class = declare(|b| {
            b.attribute(
                "truthy_val",
                AttributeOptions::new().of_type(TypeTag::Boolean).default_value(false),
            )
        });
        assert_eq!(produce(class, json!({})).unwrap(), json!({"truthy_val": false}));
    }

    #[test]
    fn test_type_assertion_fails() {
        let class = declare(|b| b.attribute("num", AttributeOptions::new().of_type(TypeTag::String)));
        assert!(matches!(produce(class, params()), Err(Error::BadType { .. })));
    }

    #[test]
    fn test_boolean_type_accepts_false() {
        let class = declare(|b| b.attribute("truthy_val", AttributeOptions::new().of_type(TypeTag::Boolean)));
        assert_eq!(
            produce(class, json!({"truthy_val": false})).unwrap(),
            json!({"truthy_val": false})
        );
    }

    #[test]
    fn test_null_values_omitted_unless_shown() {
        let declare_num = || declare(|b| b.attribute("num", AttributeOptions::new().of_type(TypeTag::String)));
        assert_eq!(produce(declare_num(), json!({"num": null})).unwrap(), json!({}));

        let instance = ModelInstance::new(declare_num(), Model::from_value(json!({"num": null})).unwrap());
        assert_eq!(Value::Object(instance.to_map(true).unwrap()), json!({"num": null}));
    }

    #[test]
    fn test_type_check_after_rename() {
        let class = declare(|b| {
            b.attribute("my_num", AttributeOptions::new().rename("num").of_type(TypeTag::String))
        });
        assert!(matches!(produce(class, params()), Err(Error::BadType { .. })));
    }

    #[test]
    fn test_rename() {
        let class = declare(|b| b.attribute("my_num", AttributeOptions::new().rename("num")));
        assert_eq!(produce(class, params()).unwrap(), json!({"my_num": 12}));
    }
}

#[cfg(test)]
mod stringify {
    use super::*;

    #[test]
    fn test_stringify_number() {
        let class = declare(|b| b.attribute("num", AttributeOptions::new().stringify()));
        assert_eq!(produce(class, params()).unwrap(), json!({"num": "12"}));
    }

    #[test]
    fn test_stringified_renamed_default() {
        let class = declare(|b| {
            b.attribute(
                "my_num",
                AttributeOptions::new().rename("num").stringify().default_value(22),
            )
        });
        assert_eq!(produce(class, json!({})).unwrap(), json!({"my_num": "22"}));
    }

    #[test]
    fn test_stringify_after_type_check() {
        let class = declare(|b| {
            b.attribute("num", AttributeOptions::new().stringify().of_type(TypeTag::Integer))
        });
        assert_eq!(produce(class, params()).unwrap(), json!({"num": "12"}));
    }

    #[test]
    fn test_default_type_checked_before_stringify() {
        let class = declare(|b| {
            b.attribute(
                "my_num",
                AttributeOptions::new()
                    .rename("num")
                    .stringify()
                    .default_value(22)
                    .of_type(TypeTag::String),
            )
        });
        match produce(class, json!({})) {
            Err(Error::BadType { value, expected }) => {
                assert_eq!(value, json!(22));
                assert_eq!(expected, TypeTag::String);
            }
            other => panic!("Expected BadType, got {:?}", other),
        }
    }

    #[test]
    fn test_to_json() {
        let class = declare(|b| b.required("num", AttributeOptions::new()));
        let instance = ModelInstance::new(class, Model::from_value(params()).unwrap());
        assert_eq!(instance.to_json(false).unwrap(), "{\"num\":12}");
    }
}

#[cfg(test)]
mod required_attributes {
    use super::*;

    #[test]
    fn test_missing_when_null() {
        let class = declare(|b| b.required("d", AttributeOptions::new()));
        match produce(class, json!({"d": null})) {
            Err(Error::MissingAttribute { name }) => assert_eq!(name, "d"),
            other => panic!("Expected MissingAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_false_is_present() {
        let class = declare(|b| b.required("d", AttributeOptions::new()));
        assert_eq!(produce(class, json!({"d": false})).unwrap(), json!({"d": false}));
    }

    #[test]
    fn test_required_stringify_and_rename() {
        let class = declare(|b| b.required("num", AttributeOptions::new().stringify()));
        assert_eq!(produce(class, params()).unwrap(), json!({"num": "12"}));

        let class = declare(|b| b.required("my_num", AttributeOptions::new().rename("num")));
        assert_eq!(produce(class, params()).unwrap(), json!({"my_num": 12}));
    }

    #[test]
    fn test_missing_accessor_on_object() {
        let class = declare(|b| b.required("a", AttributeOptions::new()));
        let model = Model::object(|_: &str| -> Option<Value> { None });
        assert!(matches!(
            ModelInstance::new(class, model).to_map(false),
            Err(Error::MissingAttribute { .. })
        ));
    }
}

#[cfg(test)]
mod nested_structures {
    use super::*;

    #[test]
    fn test_typed_array() {
        let class = declare(|b| b.attribute("ids", AttributeOptions::new().typed_array(TypeTag::Integer)));
        assert_eq!(produce(class, json!({"ids": [1, 2, 3]})).unwrap(), json!({"ids": [1, 2, 3]}));
    }

    #[test]
    fn test_typed_array_rejects_mixed() {
        let class = declare(|b| b.attribute("ids", AttributeOptions::new().typed_array(TypeTag::Boolean)));
        assert!(matches!(
            produce(class, json!({"ids": [true, "value", false]})),
            Err(Error::BadType { .. })
        ));
    }

    #[test]
    fn test_typed_hash_drops_unlisted() {
        let class = declare(|b| {
            b.attribute(
                "data",
                AttributeOptions::new().typed_hash([("num", TypeTag::Numeric), ("bool", TypeTag::Boolean)]),
            )
        });
        let output = produce(class, json!({"data": {"num": 12, "value": "x", "bool": true}})).unwrap();
        assert_eq!(output, json!({"data": {"num": 12, "bool": true}}));
    }

    #[test]
    fn test_typed_hash_stringified() {
        let class = declare(|b| {
            b.attribute(
                "data",
                AttributeOptions::new().typed_hash([("num", TypeTag::Numeric)]).stringify(),
            )
        });
        let output = produce(class, json!({"data": {"num": 12, "value": "x"}})).unwrap();
        assert_eq!(output, json!({"data": "{\"num\":12}"}));
    }

    #[test]
    fn test_typed_hash_wrong_type() {
        let class = declare(|b| {
            b.attribute("data", AttributeOptions::new().typed_hash([("num", TypeTag::Numeric)]))
        });
        match produce(class, json!({"data": {"num": "12"}})) {
            Err(Error::BadType { value, expected }) => {
                assert_eq!(value, json!("12"));
                assert_eq!(expected, TypeTag::Numeric);
            }
            other => panic!("Expected BadType, got {:?}", other),
        }
    }

    #[test]
    fn test_typed_hash_renamed() {
        let class = declare(|b| {
            b.attribute(
                "my_data",
                AttributeOptions::new().typed_hash([("num", TypeTag::Numeric)]).rename("data"),
            )
        });
        let output = produce(class, json!({"data": {"num": 12, "value": "x"}})).unwrap();
        assert_eq!(output, json!({"my_data": {"num": 12}}));
    }

    #[test]
    fn test_typed_hash_default() {
        let class = declare(|b| {
            b.attribute(
                "data",
                AttributeOptions::new()
                    .typed_hash([("num", TypeTag::Numeric)])
                    .default_value(json!({"num": 4})),
            )
        });
        let output = produce(class, json!({"data": {"value": "x"}})).unwrap();
        assert_eq!(output, json!({"data": {"num": 4}}));
    }

    #[test]
    fn test_required_typed_hash_with_missing_keys() {
        let class = declare(|b| b.required("data", AttributeOptions::new().typed_hash([("num", TypeTag::Numeric)])));
        assert_eq!(produce(class, json!({"data": {"value": "x"}})).unwrap(), json!({"data": {}}));

        let class = declare(|b| b.required("data", AttributeOptions::new().typed_hash([("num", TypeTag::Numeric)])));
        let output = produce(class, json!({"data": {"num": 12, "value": "x"}})).unwrap();
        assert_eq!(output, json!({"data": {"num": 12}}));
    }

    #[test]
    fn test_scalar_hash_permits_scalars() {
        let class = declare(|b| b.attribute("data", AttributeOptions::new().scalar_hash()));
        let input = json!({"data": {"num": 12, "value": "x", "truthy": false}});
        assert_eq!(
            produce(class, input).unwrap(),
            json!({"data": {"num": 12, "value": "x", "truthy": false}})
        );
    }

    #[test]
    fn test_scalar_hash_renamed_and_stringified() {
        let class = declare(|b| b.attribute("my_data", AttributeOptions::new().scalar_hash().rename("data")));
        let output = produce(class, json!({"data": {"num": 12, "value": "x"}})).unwrap();
        assert_eq!(output, json!({"my_data": {"num": 12, "value": "x"}}));

        let class = declare(|b| b.attribute("data", AttributeOptions::new().scalar_hash().stringify()));
        let output = produce(class, json!({"data": {"num": 12, "value": "x"}})).unwrap();
        assert_eq!(output, json!({"data": "{\"num\":12,\"value\":\"x\"}"}));
    }

    #[test]
    fn test_scalar_hash_rejects_containers() {
        let nested = declare(|b| b.attribute("data", AttributeOptions::new().scalar_hash()));
        assert!(matches!(
            produce(nested, json!({"data": {"num": 12, "value": {"nested": "value"}}})),
            Err(Error::BadType { expected: TypeTag::Scalar, .. })
        ));

        let array = declare(|b| b.attribute("data", AttributeOptions::new().scalar_hash()));
        assert!(matches!(
            produce(array, json!({"data": {"num": 12, "value": ["array value"]}})),
            Err(Error::BadType { expected: TypeTag::Scalar, .. })
        ));
    }

    #[test]
    fn test_scalar_hash_from_object() {
        let class = declare(|b| b.attribute("b", AttributeOptions::new().scalar_hash()));
        let model = Model::object(|name: &str| match name {
            "a" => Some(json!("a")),
            "b" => Some(json!({"num": 12, "value": "x"})),
            _ => None,
        });
        let output = ModelInstance::new(class, model).to_map(false).unwrap();
        assert_eq!(Value::Object(output), json!({"b": {"num": 12, "value": "x"}}));

        let class = declare(|b| b.attribute("b", AttributeOptions::new().scalar_hash()));
        let model = Model::object(|name: &str| match name {
            "b" => Some(json!({"value": {"nested": "value"}})),
            _ => None,
        });
        assert!(ModelInstance::new(class, model).to_map(false).is_err());
    }

    #[test]
    fn test_scalar_hash_default_on_empty() {
        let class = declare(|b| {
            b.attribute(
                "data",
                AttributeOptions::new()
                    .scalar_hash()
                    .default_value(json!({"num": 9, "value": "y"})),
            )
        });
        assert_eq!(
            produce(class, json!({"data": {}})).unwrap(),
            json!({"data": {"num": 9, "value": "y"}})
        );
    }

    #[test]
    fn test_required_scalar_hash() {
        let class = declare(|b| b.required("data", AttributeOptions::new().scalar_hash()));
        assert_eq!(produce(class, json!({"data": {}})).unwrap(), json!({"data": {}}));

        let class = declare(|b| b.required("data", AttributeOptions::new().scalar_hash()));
        assert!(matches!(
            produce(class, json!({"data": null})),
            Err(Error::MissingAttribute { .. })
        ));
    }
}
