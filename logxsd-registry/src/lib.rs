//! # logxsd Registry
//!
//! Plugin type registry consumed by the schema generator.
//!
//! This crate provides:
//! - The introspected type model (types, properties, annotations)
//! - The `TypeCatalog` capability trait and an in-memory `Registry`
//! - A parser for XML registry descriptions
//! - Registry validation
//! - The built-in catalog of logging target plugins

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod parser;
pub mod types;
pub mod validation;

pub use builtin::logging_targets;
pub use catalog::{Registry, TypeCatalog};
pub use error::{ParseError, RegistryError};
pub use parser::parse_registry;
pub use types::{
    ArrayElement, ComponentAnnotation, Primitive, Property, TypeInfo, TypeKey, TypeKind,
    WellKnown,
};
pub use validation::validate_registry;
