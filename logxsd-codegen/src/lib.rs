//! # logxsd Codegen
//!
//! Schema type definition generation from a plugin type catalog.
//!
//! This crate provides:
//! - The naming policy for schema type and attribute names
//! - Type classification
//! - Enumeration and complex type emission
//! - The memoizing type graph walker
//!
//! Generation yields plain [`SchemaDef`] records; rendering them into a
//! document is left to the caller.

pub mod classify;
pub mod defs;
pub mod enums;
pub mod error;
pub mod generator;
pub mod naming;
pub mod structured;
pub mod visited;

pub use defs::{AttributeDef, ComplexTypeDef, ElementDef, EnumerationDef, SchemaDef};
pub use error::CodegenError;
pub use generator::Generator;

use logxsd_registry::TypeCatalog;

/// Generates the schema definitions of every type reachable from the
/// catalog's root types.
///
/// # Arguments
/// * `catalog` - Type catalog to introspect
///
/// # Returns
/// Definitions in discovery order.
///
/// # Errors
/// Returns `CodegenError` if the catalog is inconsistent.
pub fn generate_definitions<C: TypeCatalog + ?Sized>(
    catalog: &C,
) -> Result<Vec<SchemaDef>, CodegenError> {
    Generator::new(catalog).generate()
}
