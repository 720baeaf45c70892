//! Model classes and the instances that produce output mappings

use crate::attribute::AttributeSpec;
use crate::error::{Error, Result};
use crate::model::Model;
use crate::registry::AttributeSet;
use crate::resolve;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// A declared model class: its attributes plus overridable hooks
pub trait ModelClass {
    /// The inheritance-resolved attribute declarations of this class
    fn attributes(&self) -> &AttributeSet;

    /// Runs once per output production, before any attribute resolves
    fn preprocess(&self, _model: &Model) -> Result<()> {
        Ok(())
    }

    /// Wraps the resolution of every attribute during output production
    fn around_attribute(
        &self,
        _name: &str,
        resolve: &mut dyn FnMut() -> Result<Option<Value>>,
    ) -> Result<Option<Value>> {
        resolve()
    }

    /// Resolves one attribute; override to compute a value differently
    fn resolve_attribute(&self, spec: &AttributeSpec, model: &Model) -> Result<Option<Value>> {
        resolve::resolve(spec, model)
    }
}

/// A model class bound to one input model
#[derive(Debug)]
pub struct ModelInstance<C> {
    class: C,
    model: Model,
}

impl<C: ModelClass> ModelInstance<C> {
    /// Bind a model class to its input
    pub fn new(class: C, model: impl Into<Model>) -> Self {
        Self {
            class,
            model: model.into(),
        }
    }

    /// The wrapped input
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The model class
    pub fn class(&self) -> &C {
        &self.class
    }

    /// Release the wrapped input
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Resolve a single declared attribute, without running hooks
    pub fn attribute(&self, name: &str) -> Result<Option<Value>> {
        let spec = self
            .class
            .attributes()
            .get(name)
            .ok_or_else(|| Error::UnknownAttribute {
                name: name.to_string(),
            })?;
        self.class.resolve_attribute(spec, &self.model)
    }

    /// Produce the whitelisted output mapping
    ///
    /// Absent values are omitted unless `show_absent` is set, in which case
    /// they appear as `null`. Any failing attribute fails the whole call.
    pub fn to_map(&self, show_absent: bool) -> Result<Map<String, Value>> {
        let attributes = self.class.attributes();
        debug!(
            attributes = attributes.len(),
            show_absent,
            "Producing output mapping"
        );

        self.class.preprocess(&self.model)?;

        let mut result = Map::new();
        for spec in attributes.merged_attributes() {
            let value = self.class.around_attribute(&spec.name, &mut || {
                self.class.resolve_attribute(spec, &self.model)
            })?;

            match value.filter(|value| !value.is_null()) {
                Some(value) => {
                    trace!(attribute = %spec.name, "Resolved attribute");
                    result.insert(spec.name.clone(), value);
                }
                None if show_absent => {
                    trace!(attribute = %spec.name, "Attribute absent, kept as null");
                    result.insert(spec.name.clone(), Value::Null);
                }
                None => trace!(attribute = %spec.name, "Attribute absent, omitted"),
            }
        }

        Ok(result)
    }

    /// Produce the output mapping encoded as JSON text
    pub fn to_json(&self, show_absent: bool) -> Result<String> {
        let map = self.to_map(show_absent)?;
        Ok(serde_json::to_string(&map)?)
    }
}

impl<C: ModelClass + Default> ModelInstance<C> {
    /// Bind the default value of a stateless model class
    pub fn wrap(model: impl Into<Model>) -> Self {
        Self::new(C::default(), model)
    }
}

impl<C: ModelClass> PartialEq for ModelInstance<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self.to_map(false), other.to_map(false)) {
            (Ok(left), Ok(right)) => left == right,
            _ => false,
        }
    }
}
