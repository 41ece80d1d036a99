//! Error type used by the crate.

use thiserror::Error;

use crate::geo::Reference;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeowireTypesError {
    /// A coordinate sequence cannot be used as a polygon ring.
    #[error("invalid ring: {0}")]
    InvalidRing(String),

    /// Coordinates cannot be converted between the two references.
    #[error("cannot convert coordinates from {from} to {to}")]
    ReferenceMismatch {
        /// Reference the coordinates are expressed in.
        from: Reference,
        /// Requested reference.
        to: Reference,
    },

    /// Projection produced a coordinate that cannot be represented.
    #[error("projection failed for coordinate ({x}, {y})")]
    Projection {
        /// First ordinate of the input coordinate.
        x: f64,
        /// Second ordinate of the input coordinate.
        y: f64,
    },

    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
}
