//! Error type returned by the codecs.

use geowire_types::error::GeowireTypesError;
use geowire_types::Reference;
use thiserror::Error;

/// Codec error.
///
/// Every failure is a hard validation failure of the input. There is no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Malformed byte stream or text, truncated buffer, unbalanced parentheses.
    #[error("data corrupted: {0}")]
    DataCorrupted(String),

    /// Structurally valid geometry without any coordinates where content is required.
    #[error("geometry is empty")]
    EmptyGeometry,

    /// Geometry does not match the structure required by its parent, or has non-finite required ordinates.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// No coordinate reference could be resolved.
    #[error("unknown coordinate reference: {0}")]
    UnknownReference(String),

    /// Unrecognized geometry type code, keyword or byte order marker.
    #[error("unexpected type: {0}")]
    UnexpectedType(String),

    /// Coordinates cannot be converted between the source and target references.
    #[error("cannot convert coordinates from {from} to {to}")]
    ReferenceMismatch {
        /// Reference of the input coordinates.
        from: Reference,
        /// Requested reference.
        to: Reference,
    },
}

impl From<GeowireTypesError> for CodecError {
    fn from(value: GeowireTypesError) -> Self {
        match value {
            GeowireTypesError::ReferenceMismatch { from, to } => {
                Self::ReferenceMismatch { from, to }
            }
            GeowireTypesError::InvalidRing(_)
            | GeowireTypesError::Projection { .. }
            | GeowireTypesError::Conversion(_) => Self::InvalidGeometry(value.to_string()),
        }
    }
}

impl From<hex::FromHexError> for CodecError {
    fn from(value: hex::FromHexError) -> Self {
        Self::DataCorrupted(format!("invalid hex string: {value}"))
    }
}
