//! Error types for schema generation.

use thiserror::Error;

/// Error type for schema generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Registry lookup error.
    #[error("registry error: {0}")]
    Registry(#[from] logxsd_registry::RegistryError),
}
