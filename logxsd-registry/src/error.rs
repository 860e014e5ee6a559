//! Error types for registry construction, parsing and validation.

use crate::types::{TypeKey, WellKnown};
use thiserror::Error;

/// Error type for registry description parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' referenced by '{referenced_by}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Type or property holding the reference.
        referenced_by: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, property, member).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid document structure.
    #[error("invalid registry structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// Registry construction error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for registry lookups and validation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Key not present in the catalog.
    #[error("type key {key} not found")]
    UnknownKey {
        /// Missing key.
        key: TypeKey,
    },

    /// Type declared twice.
    #[error("type '{name}' is already declared")]
    DuplicateType {
        /// Type name.
        name: String,
    },

    /// Well-known tag assigned twice.
    #[error("well-known tag '{tag}' is already assigned to '{existing}'")]
    DuplicateWellKnown {
        /// Tag.
        tag: WellKnown,
        /// Name of the type already holding the tag.
        existing: String,
    },

    /// Circular base type chain.
    #[error("circular base type chain detected: {path}")]
    CircularBase {
        /// Path of the cycle.
        path: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown type reference error.
    pub fn unknown_type(type_name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            referenced_by: referenced_by.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl RegistryError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
