//! Prelude module for convenient imports.
//!
//! ```ignore
//! use logxsd::prelude::*;
//! ```

// Registry
pub use logxsd_registry::{
    ParseError, Property, Registry, RegistryError, TypeCatalog, TypeInfo, TypeKey, TypeKind,
    WellKnown, logging_targets, parse_registry, validate_registry,
};

// Generation
pub use logxsd_codegen::{CodegenError, Generator, SchemaDef, generate_definitions};

// Document
pub use logxsd_document::{DocumentError, INSERTION_MARKER, assemble};

// Facade
pub use crate::cli::Cli;
pub use crate::error::{Error as GenerateError, Result as GenerateResult};
pub use crate::{DEFAULT_TEMPLATE, generate_document, run};
