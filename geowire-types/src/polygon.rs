use serde::{Deserialize, Serialize};

use crate::line_string::Ring;

/// Polygon with an outer boundary and optional holes.
///
/// A polygon without rings is an empty polygon.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Polygon {
    rings: Vec<Ring>,
}

impl Polygon {
    /// Creates a new polygon from the outer boundary and holes.
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        let mut rings = Vec::with_capacity(interiors.len() + 1);
        rings.push(exterior);
        rings.extend(interiors);
        Self { rings }
    }

    /// Creates a polygon from the list of rings. The first ring is the outer boundary.
    pub fn from_rings(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// All the rings, outer boundary first.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Outer boundary, `None` for an empty polygon.
    pub fn exterior(&self) -> Option<&Ring> {
        self.rings.first()
    }

    /// Holes of the polygon.
    pub fn interiors(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or_default()
    }

    /// Returns true if the polygon has no rings.
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}
