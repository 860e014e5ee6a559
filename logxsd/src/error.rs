//! Error types for document generation.

use thiserror::Error;

/// Error type for generating a complete schema document.
#[derive(Debug, Error)]
pub enum Error {
    /// Definition generation failed.
    #[error("failed to generate schema definitions")]
    Codegen(#[from] logxsd_codegen::CodegenError),

    /// Definitions could not be spliced into the template.
    #[error("failed to assemble schema")]
    Document(#[from] logxsd_document::DocumentError),
}

/// Result type for document generation.
pub type Result<T> = std::result::Result<T, Error>;
