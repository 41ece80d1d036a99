use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::GeowireTypesError;

/// Ordered sequence of coordinates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LineString {
    points: Vec<Coordinate>,
}

impl std::ops::Deref for LineString {
    type Target = [Coordinate];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl LineString {
    /// Creates a new line string.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Coordinates of the line.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the line and returns its coordinates.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Returns true if the line is not empty and its first and last coordinates are at the same position.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.same_position(last),
            _ => false,
        }
    }

    /// Converts self into a [`Ring`] if the line is closed and has at least [`Ring::MIN_POINTS`] coordinates.
    pub fn into_ring(self) -> Result<Ring, GeowireTypesError> {
        Ring::try_from(self)
    }
}

impl From<Vec<Coordinate>> for LineString {
    fn from(value: Vec<Coordinate>) -> Self {
        Self::new(value)
    }
}

/// Closed line string used as a polygon boundary.
///
/// A ring always has at least 4 coordinates, and its first and last coordinates are at the same position.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "LineString", into = "LineString")]
pub struct Ring {
    line: LineString,
}

impl Ring {
    /// Minimal number of coordinates in a ring.
    pub const MIN_POINTS: usize = 4;

    /// Coordinates of the ring, including the closing one.
    pub fn points(&self) -> &[Coordinate] {
        self.line.points()
    }

    /// Returns the ring as a line string.
    pub fn as_line_string(&self) -> &LineString {
        &self.line
    }
}

impl std::ops::Deref for Ring {
    type Target = [Coordinate];

    fn deref(&self) -> &Self::Target {
        self.line.points()
    }
}

impl TryFrom<LineString> for Ring {
    type Error = GeowireTypesError;

    fn try_from(line: LineString) -> Result<Self, Self::Error> {
        if line.len() < Self::MIN_POINTS {
            return Err(GeowireTypesError::InvalidRing(format!(
                "ring must have at least {} coordinates, but has {}",
                Self::MIN_POINTS,
                line.len()
            )));
        }

        if !line.is_closed() {
            return Err(GeowireTypesError::InvalidRing(
                "first and last coordinates of a ring must be equal".into(),
            ));
        }

        Ok(Self { line })
    }
}

impl TryFrom<Vec<Coordinate>> for Ring {
    type Error = GeowireTypesError;

    fn try_from(points: Vec<Coordinate>) -> Result<Self, Self::Error> {
        LineString::new(points).try_into()
    }
}

impl From<Ring> for LineString {
    fn from(value: Ring) -> Self {
        value.line
    }
}
