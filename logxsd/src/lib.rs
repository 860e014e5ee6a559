//! # logxsd
//!
//! Generates an XML Schema (XSD) describing a logging framework's
//! configuration file format from its plugin type registry.
//!
//! Every type reachable from the registry's root plugin types becomes either
//! an `xs:simpleType` enumeration or an `xs:complexType`; the definitions are
//! spliced into a hand-written template at its `<types-go-here/>` marker.
//!
//! ## Quick Start
//!
//! ```ignore
//! use logxsd::prelude::*;
//!
//! let registry = logging_targets()?;
//! let xsd = generate_document(&registry, DEFAULT_TEMPLATE)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`registry`] - Type model, catalog trait, registry parsing and validation
//! - [`codegen`] - Schema definition generation
//! - [`document`] - XSD rendering and template assembly

pub mod cli;
pub mod error;
pub mod prelude;

/// Type model, catalog trait, registry parsing and validation.
pub mod registry {
    pub use logxsd_registry::*;
}

/// Schema definition generation.
pub mod codegen {
    pub use logxsd_codegen::*;
}

/// XSD rendering and template assembly.
pub mod document {
    pub use logxsd_document::*;
}

pub use error::{Error, Result};

use anyhow::Context;
use cli::Cli;
use logxsd_registry::{Registry, TypeCatalog};
use std::fs;
use std::path::{Path, PathBuf};

/// Template used when no `--template` is given.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/template.xsd");

/// Generates the complete schema document for `catalog`.
///
/// # Errors
/// Returns `Error` if generation fails or `template` cannot be spliced.
pub fn generate_document<C: TypeCatalog + ?Sized>(catalog: &C, template: &str) -> Result<String> {
    let defs = logxsd_codegen::generate_definitions(catalog)?;
    Ok(logxsd_document::assemble(template, &defs)?)
}

/// Loads the registry description at `path`, or the built-in catalog.
fn load_registry(path: Option<&Path>) -> anyhow::Result<Registry> {
    let registry = match path {
        Some(path) => {
            let xml = fs::read_to_string(path)
                .with_context(|| format!("failed to read registry {}", path.display()))?;
            logxsd_registry::parse_registry(&xml)
                .with_context(|| format!("failed to parse registry {}", path.display()))?
        }
        None => logxsd_registry::logging_targets().context("failed to build built-in catalog")?,
    };

    tracing::info!(
        "Loaded registry with {} types ({} roots)",
        registry.len(),
        registry.root_types().len()
    );
    Ok(registry)
}

fn load_template(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display())),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Runs one generation: load, validate, generate, assemble, save.
///
/// # Returns
/// The path the schema was written to.
///
/// # Errors
/// Returns an error if any stage fails. A failed write may leave a missing
/// or partial output file.
pub fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    let template = load_template(cli.template.as_deref())?;
    let registry = load_registry(cli.registry.as_deref())?;

    if cli.no_validate {
        tracing::warn!("Registry validation skipped");
    } else {
        logxsd_registry::validate_registry(&registry).context("invalid registry")?;
    }

    let document = generate_document(&registry, &template)?;

    println!("Saving schema to: {}", cli.output.display());
    fs::write(&cli.output, document)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    tracing::info!("Saved schema to {}", cli.output.display());

    Ok(cli.output.clone())
}
