//! Error types for document rendering and assembly.

use thiserror::Error;

/// Error type for document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output is not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Template has no insertion marker.
    #[error("insertion marker <{marker}> not found in template")]
    MarkerNotFound {
        /// Marker element name.
        marker: String,
    },

    /// Template has more than one insertion marker.
    #[error("template contains more than one insertion marker <{marker}>")]
    DuplicateMarker {
        /// Marker element name.
        marker: String,
    },

    /// Generated fragment is not a single well-formed root element.
    #[error("generated fragment is not a single closed root element")]
    UnbalancedFragment,

    /// Template ended inside the marker element.
    #[error("invalid template: {message}")]
    Template {
        /// Error message.
        message: String,
    },
}
