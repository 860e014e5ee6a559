//! # logxsd Document
//!
//! Turns generated schema definitions into the final XSD document.
//!
//! This crate provides:
//! - XSD markup rendering of [`SchemaDef`](logxsd_codegen::SchemaDef) records
//! - Splicing of rendered definitions into a template at its insertion marker

pub mod assembler;
pub mod error;
pub mod render;

pub use assembler::{INSERTION_MARKER, assemble, splice};
pub use error::DocumentError;
pub use render::{XS_NAMESPACE, render_fragment, write_definition};
