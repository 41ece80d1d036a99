use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;

/// Heterogeneous set of geometries. Collections can be nested.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GeometryCollection(Vec<Geometry>);

impl GeometryCollection {
    /// Members of the collection.
    pub fn geometries(&self) -> &[Geometry] {
        &self.0
    }
}

impl From<Vec<Geometry>> for GeometryCollection {
    fn from(value: Vec<Geometry>) -> Self {
        Self(value)
    }
}
