use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::cartesian::NewCartesianPoint2d;
use crate::geo::datum::Datum;
use crate::geo::point::NewGeoPoint;
use crate::geo::projection::Projection;
use crate::geo::web_mercator::WebMercator;

/// Coordinate system a coordinate is expressed in.
///
/// Only these three references can appear on the wire. Each of them has a canonical SRID, see
/// [`Reference::srid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reference {
    /// No reference system. Coordinates are passed through verbatim.
    Unspecified,
    /// Longitude and latitude in degrees on WGS84 (EPSG:4326).
    Geographic,
    /// Web-Mercator meters (EPSG:3857).
    Projected,
}

impl Reference {
    /// SRID of [`Reference::Geographic`].
    pub const EPSG4326: i32 = 4326;
    /// SRID of [`Reference::Projected`].
    pub const EPSG3857: i32 = 3857;

    /// Legacy and vendor codes that name the same web-Mercator system as EPSG:3857.
    pub const WEB_MERCATOR_ALIASES: [i32; 4] = [900913, 3785, 102100, 102113];

    /// Canonical SRID of the reference. `0` for [`Reference::Unspecified`].
    pub fn srid(&self) -> i32 {
        match self {
            Reference::Unspecified => 0,
            Reference::Geographic => Self::EPSG4326,
            Reference::Projected => Self::EPSG3857,
        }
    }

    /// Resolves an SRID into a reference. Returns `None` for SRIDs that name no known system.
    ///
    /// `0` resolves to [`Reference::Unspecified`]. Callers that must not infer the unspecified reference (e.g.
    /// from an SRID embedded in untrusted data) should check for it explicitly.
    pub fn from_srid(srid: i32) -> Option<Self> {
        match srid {
            0 => Some(Reference::Unspecified),
            Self::EPSG4326 => Some(Reference::Geographic),
            Self::EPSG3857 => Some(Reference::Projected),
            v if Self::WEB_MERCATOR_ALIASES.contains(&v) => Some(Reference::Projected),
            _ => None,
        }
    }

    /// Returns true if the coordinates in this reference can be converted into `target`.
    ///
    /// The unspecified reference can only be "converted" into itself.
    pub fn can_convert_to(&self, target: Reference) -> bool {
        match (self, target) {
            (Reference::Unspecified, Reference::Unspecified) => true,
            (Reference::Unspecified, _) | (_, Reference::Unspecified) => false,
            _ => true,
        }
    }

    /// Returns the projection from geographic coordinates into this reference, if the reference is a projected
    /// one.
    pub fn get_projection<In, Out>(&self) -> Option<Box<dyn Projection<InPoint = In, OutPoint = Out>>>
    where
        In: NewGeoPoint + 'static,
        Out: NewCartesianPoint2d + 'static,
    {
        match self {
            Reference::Projected => Some(Box::new(WebMercator::new(Datum::WGS84))),
            Reference::Geographic | Reference::Unspecified => None,
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Unspecified => write!(f, "unspecified reference"),
            Reference::Geographic | Reference::Projected => write!(f, "EPSG:{}", self.srid()),
        }
    }
}
