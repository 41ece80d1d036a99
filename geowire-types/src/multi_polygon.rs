use serde::{Deserialize, Serialize};

use crate::polygon::Polygon;

/// A set of polygons.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MultiPolygon(Vec<Polygon>);

impl MultiPolygon {
    /// Polygons of the set.
    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }
}

impl From<Vec<Polygon>> for MultiPolygon {
    fn from(value: Vec<Polygon>) -> Self {
        Self(value)
    }
}
