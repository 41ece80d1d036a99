use serde::{Deserialize, Serialize};

/// Reference ellipsoid of geographic coordinates. Spherical projections use its semimajor axis as the
/// sphere radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    semimajor: f64,
}

impl Datum {
    /// WGS84 ellipsoid shared by EPSG:4326 and EPSG:3857.
    pub const WGS84: Self = Self::with_semimajor(6_378_137.0);

    /// Creates a datum with the given semimajor axis in meters.
    pub const fn with_semimajor(semimajor: f64) -> Self {
        Self { semimajor }
    }

    /// Semimajor axis in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}
