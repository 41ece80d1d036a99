use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A set of points.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MultiPoint(Vec<Coordinate>);

impl MultiPoint {
    /// Coordinates of the points.
    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }
}

impl From<Vec<Coordinate>> for MultiPoint {
    fn from(value: Vec<Coordinate>) -> Self {
        Self(value)
    }
}
