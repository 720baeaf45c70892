//! Describe command handler

use super::load_catalog;
use crate::cli::{DescribeArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{format_value_compact, OutputWriter};
use serde::Serialize;
use serde_json::Value;
use specado_boundary::{AttributeSet, AttributeSpec, Catalog, Nested, TypeTag};
use std::path::Path;
use tracing::{info, instrument};

/// Serializable view of one model class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescription {
    pub name: String,
    pub attributes: Vec<AttributeDescription>,
}

/// Serializable view of one resolved attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDescription {
    pub name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<TypeTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<String>,
    pub stringify: bool,
}

impl AttributeDescription {
    fn from_spec(spec: &AttributeSpec) -> Self {
        Self {
            name: spec.name.clone(),
            required: spec.required,
            source: spec.is_renamed().then(|| spec.source_name.clone()),
            type_tag: spec.expected_type,
            default: spec.default_value.clone(),
            nested: describe_nested(&spec.nested),
            stringify: spec.stringify,
        }
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            if self.required { "yes" } else { "" }.to_string(),
            self.source.clone().unwrap_or_default(),
            self.type_tag.map(|tag| tag.to_string()).unwrap_or_default(),
            self.default.as_ref().map(format_value_compact).unwrap_or_default(),
            self.nested.clone().unwrap_or_default(),
            if self.stringify { "yes" } else { "" }.to_string(),
        ]
    }
}

/// Handle the describe command
#[instrument(skip(config, output))]
pub fn handle_describe(args: DescribeArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("describe_command");

    let catalog_path = config.catalog_path(args.catalog.as_deref())?;
    let catalog = load_catalog(&catalog_path)?;
    let descriptions = describe(&catalog, &catalog_path, args.model.as_deref())?;
    info!(models = descriptions.len(), "Describing catalog");

    if output.format() != OutputFormat::Human {
        return output.data(&descriptions);
    }

    if descriptions.is_empty() {
        return output.info(&format!("No models declared in {}", catalog_path.display()));
    }

    for description in &descriptions {
        output.section(&description.name)?;
        let rows = description.attributes.iter().map(AttributeDescription::row).collect();
        output.table(
            &["attribute", "required", "source", "type", "default", "nested", "stringify"],
            rows,
        )?;
    }
    Ok(())
}

/// Describe every model of a catalog, or only `model`
pub(crate) fn describe(
    catalog: &Catalog,
    catalog_path: &Path,
    model: Option<&str>,
) -> Result<Vec<ModelDescription>> {
    match model {
        Some(name) => {
            let attributes = catalog.get(name).ok_or_else(|| Error::ModelNotFound {
                name: name.to_string(),
                catalog: catalog_path.to_path_buf(),
            })?;
            Ok(vec![describe_model(name, attributes)])
        }
        None => Ok(catalog
            .names()
            .filter_map(|name| catalog.get(name).map(|set| describe_model(name, set)))
            .collect()),
    }
}

fn describe_model(name: &str, attributes: &AttributeSet) -> ModelDescription {
    ModelDescription {
        name: name.to_string(),
        attributes: attributes
            .merged_attributes()
            .iter()
            .map(AttributeDescription::from_spec)
            .collect(),
    }
}

fn describe_nested(nested: &Nested) -> Option<String> {
    match nested {
        Nested::None => None,
        Nested::TypedHash(fields) => Some(format!(
            "hash{{{}}}",
            fields
                .iter()
                .map(|(key, tag)| format!("{}: {}", key, tag))
                .collect::<Vec<_>>()
                .join(", ")
        )),
        Nested::ScalarHash => Some("scalar hash".to_string()),
        Nested::TypedArray(tag) => Some(format!("array<{}>", tag)),
    }
}
