//! Per-class attribute registry with inheritance
//!
//! A model class owns one [`AttributeSet`]. Child classes are built from the
//! parent's resolved set with [`AttributeSet::extend`], which copies the
//! parent's merged list and never mutates the parent.
//!
//! Static model classes usually build their set once behind a `OnceLock`:
//!
//! ```rust
//! use specado_boundary::{AttributeOptions, AttributeSet, TypeTag};
//! use std::sync::OnceLock;
//!
//! fn event_attributes() -> &'static AttributeSet {
//!     static SET: OnceLock<AttributeSet> = OnceLock::new();
//!     SET.get_or_init(|| {
//!         AttributeSet::builder()
//!             .required("event_name", AttributeOptions::new().of_type(TypeTag::String))
//!             .attribute("metadata", AttributeOptions::new().scalar_hash())
//!             .build()
//!     })
//! }
//!
//! let names: Vec<_> = event_attributes().names().collect();
//! assert_eq!(names, vec!["event_name", "metadata"]);
//! ```

use crate::attribute::{AttributeOptions, AttributeSpec};

/// Ordered, inheritance-resolved attribute declarations of one model class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    own: Vec<AttributeSpec>,
    merged: Vec<AttributeSpec>,
}

impl AttributeSet {
    /// Start declaring a root model class
    pub fn builder() -> AttributeSetBuilder {
        AttributeSetBuilder {
            inherited: Vec::new(),
            own: Vec::new(),
        }
    }

    /// Start declaring a child of this model class
    pub fn extend(&self) -> AttributeSetBuilder {
        AttributeSetBuilder {
            inherited: self.merged.clone(),
            own: Vec::new(),
        }
    }

    /// Attributes used for output: ancestors first, redeclarations at the
    /// redeclaring class's position
    pub fn merged_attributes(&self) -> &[AttributeSpec] {
        &self.merged
    }

    /// Attributes declared by this class alone
    pub fn own_attributes(&self) -> &[AttributeSpec] {
        &self.own
    }

    /// Output key names in merged order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.merged.iter().map(|spec| spec.name.as_str())
    }

    /// Look up the effective declaration of an attribute
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.merged.iter().find(|spec| spec.name == name)
    }

    /// Number of merged attributes
    pub fn len(&self) -> usize {
        self.merged.len()
    }

    /// Check whether no attributes are declared
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }
}

/// Declaration block for one model class
#[derive(Debug, Clone)]
pub struct AttributeSetBuilder {
    inherited: Vec<AttributeSpec>,
    own: Vec<AttributeSpec>,
}

impl AttributeSetBuilder {
    /// Declare an optional attribute
    pub fn attribute(mut self, name: impl Into<String>, options: AttributeOptions) -> Self {
        self.push(options.into_spec(name.into(), false));
        self
    }

    /// Declare an attribute that must be located on the model
    pub fn required(mut self, name: impl Into<String>, options: AttributeOptions) -> Self {
        self.push(options.into_spec(name.into(), true));
        self
    }

    /// Add an already built specification
    pub fn spec(mut self, spec: AttributeSpec) -> Self {
        self.push(spec);
        self
    }

    fn push(&mut self, spec: AttributeSpec) {
        // names are unique within a class; the later declaration wins
        self.own.retain(|existing| existing.name != spec.name);
        self.own.push(spec);
    }

    /// Finish the declaration block
    pub fn build(self) -> AttributeSet {
        let merged = merge(&self.inherited, &self.own);
        AttributeSet {
            own: self.own,
            merged,
        }
    }
}

fn merge(inherited: &[AttributeSpec], own: &[AttributeSpec]) -> Vec<AttributeSpec> {
    let mut merged: Vec<AttributeSpec> = Vec::with_capacity(inherited.len() + own.len());
    for spec in inherited.iter().chain(own) {
        merged.retain(|existing| existing.name != spec.name);
        merged.push(spec.clone());
    }
    merged
}
