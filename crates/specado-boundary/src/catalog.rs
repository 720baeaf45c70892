//! Declaration catalogs: model classes declared in YAML or JSON documents
//!
//! ```yaml
//! models:
//!   user:
//!     attributes:
//!       - name: user_id
//!       - name: custom_data
//!         rename: custom_attributes
//!         scalar_hash: true
//!   inherited_user:
//!     extends: user
//!     attributes:
//!       - name: new_attribute
//!         type: String
//! ```
//!
//! Parents are resolved before children, so each model's set is built by
//! extending its parent's already merged set.

use crate::attribute::{AttributeOptions, AttributeSpec};
use crate::error::{Error, Result};
use crate::instance::ModelClass;
use crate::registry::AttributeSet;
use crate::types::TypeTag;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Supported catalog file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(Error::declaration(format!(
                "Unsupported catalog format for '{}'. Expected .yaml, .yml, or .json",
                path.display()
            ))),
        }
    }
}

/// One attribute as written in a catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeDecl {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<TypeTag>,
    #[serde(default)]
    pub stringify: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typed_hash: Option<Map<String, Value>>,
    #[serde(default)]
    pub scalar_hash: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typed_array: Option<TypeTag>,
}

/// One model class as written in a catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,
}

/// Root of a catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    #[serde(default)]
    pub models: BTreeMap<String, ModelDecl>,
}

/// Resolved model classes keyed by name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    models: BTreeMap<String, AttributeSet>,
}

impl Catalog {
    /// Load a catalog file, detecting the format from its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::declaration_with_source(format!("Failed to read catalog '{}'", path.display()), e)
        })?;
        debug!(path = %path.display(), ?format, "Loading declaration catalog");
        Self::from_str_with_format(&content, format)
    }

    /// Parse catalog content in an explicit format
    pub fn from_str_with_format(content: &str, format: Format) -> Result<Self> {
        match format {
            Format::Yaml => Self::from_yaml_str(content),
            Format::Json => Self::from_json_str(content),
        }
    }

    /// Parse a YAML catalog
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let document: CatalogDocument = serde_yaml::from_str(content)
            .map_err(|e| Error::declaration_with_source("Failed to parse YAML catalog", e))?;
        Self::from_document(document)
    }

    /// Parse a JSON catalog
    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(content)
            .map_err(|e| Error::declaration_with_source("Failed to parse JSON catalog", e))?;
        Self::from_document(document)
    }

    /// Resolve a parsed document, parents before children
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        let mut models = BTreeMap::new();
        for name in document.models.keys() {
            let mut stack = Vec::new();
            resolve_model(name, &document.models, &mut models, &mut stack)?;
        }
        debug!(models = models.len(), "Resolved declaration catalog");
        Ok(Self { models })
    }

    /// Attribute set of a model
    pub fn get(&self, name: &str) -> Option<&AttributeSet> {
        self.models.get(name)
    }

    /// A model usable as a [`ModelClass`]
    pub fn model(&self, name: &str) -> Option<CatalogModel<'_>> {
        self.models
            .get_key_value(name)
            .map(|(name, attributes)| CatalogModel { name, attributes })
    }

    /// Model names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Catalog-declared model class; hooks keep their default behavior
#[derive(Debug, Clone, Copy)]
pub struct CatalogModel<'a> {
    name: &'a str,
    attributes: &'a AttributeSet,
}

impl CatalogModel<'_> {
    pub fn name(&self) -> &str {
        self.name
    }
}

impl ModelClass for CatalogModel<'_> {
    fn attributes(&self) -> &AttributeSet {
        self.attributes
    }
}

fn resolve_model(
    name: &str,
    decls: &BTreeMap<String, ModelDecl>,
    resolved: &mut BTreeMap<String, AttributeSet>,
    stack: &mut Vec<String>,
) -> Result<()> {
    if resolved.contains_key(name) {
        return Ok(());
    }
    if stack.iter().any(|entry| entry == name) {
        stack.push(name.to_string());
        return Err(Error::declaration(format!(
            "Circular inheritance detected: {}",
            stack.join(" -> ")
        )));
    }

    let decl = decls
        .get(name)
        .ok_or_else(|| Error::declaration(format!("Unknown model '{}'", name)))?;

    stack.push(name.to_string());
    let mut builder = match &decl.extends {
        Some(parent) => {
            if !decls.contains_key(parent) {
                return Err(Error::declaration(format!(
                    "Model '{}' extends unknown model '{}'",
                    name, parent
                )));
            }
            resolve_model(parent, decls, resolved, stack)?;
            resolved
                .get(parent)
                .map(AttributeSet::extend)
                .ok_or_else(|| Error::declaration(format!("Unknown model '{}'", parent)))?
        }
        None => AttributeSet::builder(),
    };
    stack.pop();

    for attribute in &decl.attributes {
        builder = builder.spec(attribute_spec(name, attribute)?);
    }
    resolved.insert(name.to_string(), builder.build());
    Ok(())
}

fn attribute_spec(model: &str, decl: &AttributeDecl) -> Result<AttributeSpec> {
    let nested_count = [
        decl.typed_hash.is_some(),
        decl.scalar_hash,
        decl.typed_array.is_some(),
    ]
    .iter()
    .filter(|declared| **declared)
    .count();
    if nested_count > 1 {
        return Err(Error::declaration(format!(
            "Attribute '{}' of model '{}' declares more than one nested structure",
            decl.name, model
        )));
    }

    let mut options = AttributeOptions::new();
    if let Some(rename) = &decl.rename {
        options = options.rename(rename.clone());
    }
    if let Some(default) = &decl.default {
        options = options.default_value(default.clone());
    }
    if let Some(tag) = decl.type_tag {
        options = options.of_type(tag);
    }
    if decl.stringify {
        options = options.stringify();
    }
    if let Some(fields) = &decl.typed_hash {
        let mut typed = Vec::with_capacity(fields.len());
        for (key, tag) in fields {
            let tag: TypeTag = serde_json::from_value(tag.clone()).map_err(|e| {
                Error::declaration_with_source(
                    format!(
                        "Invalid type for key '{}' of attribute '{}' in model '{}'",
                        key, decl.name, model
                    ),
                    e,
                )
            })?;
            typed.push((key.clone(), tag));
        }
        options = options.typed_hash(typed);
    }
    if decl.scalar_hash {
        options = options.scalar_hash();
    }
    if let Some(tag) = decl.typed_array {
        options = options.typed_array(tag);
    }

    Ok(options.into_spec(decl.name.clone(), decl.required))
}
