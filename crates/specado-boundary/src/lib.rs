//! Specado Boundary - declarative attribute extraction for untrusted input
//!
//! This crate sits between loosely-typed request input and application code.
//! A model class declares a fixed set of attributes; wrapping an input model
//! and producing the output mapping extracts exactly those attributes, with
//! renaming, defaults, type assertions, stringification, and nested-structure
//! filtering applied per attribute.
//!
//! ## Features
//!
//! - **Whitelisting**: undeclared input keys never reach the output
//! - **Resolution Pipeline**: locate, required check, nested filter, default,
//!   type assertion, stringify, always in that order
//! - **Inheritance**: child classes extend a parent's resolved attribute list
//! - **Nested Structures**: typed hashes, scalar hashes, typed arrays
//! - **Hooks**: once-per-call preprocessing and a per-attribute wrapper
//! - **Declaration Catalogs**: model classes declared in YAML or JSON files
//!
//! ## Quick Start
//!
//! ```rust
//! use specado_boundary::{AttributeOptions, AttributeSet, Model, ModelClass, ModelInstance, TypeTag};
//! use serde_json::json;
//!
//! struct Event(AttributeSet);
//!
//! impl ModelClass for Event {
//!     fn attributes(&self) -> &AttributeSet {
//!         &self.0
//!     }
//! }
//!
//! let event = Event(
//!     AttributeSet::builder()
//!         .required("event_name", AttributeOptions::new().of_type(TypeTag::String))
//!         .attribute("metadata", AttributeOptions::new().scalar_hash())
//!         .build(),
//! );
//!
//! let input = Model::from_value(json!({
//!     "event_name": "bought",
//!     "metadata": {"item": "CD", "price": 20.01},
//!     "junk": "data"
//! })).unwrap();
//!
//! let output = ModelInstance::new(event, input).to_map(false).unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(output),
//!     json!({"event_name": "bought", "metadata": {"item": "CD", "price": 20.01}})
//! );
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod attribute;
pub mod catalog;
pub mod error;
pub mod instance;
pub mod model;
pub mod registry;
pub mod resolve;
pub mod timing;
pub mod types;

// Re-export commonly used types for convenience
pub use attribute::{AttributeOptions, AttributeSpec, Nested};
pub use catalog::{Catalog, CatalogDocument, CatalogModel};
pub use error::{Error, Result};
pub use instance::{ModelClass, ModelInstance};
pub use model::{Accessors, Model};
pub use registry::{AttributeSet, AttributeSetBuilder};
pub use resolve::with_type;
pub use types::TypeTag;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
