//! Geometry model and coordinate references shared by the `geowire` codecs.
//!
//! Geometries are a closed set of variants (see [`Geometry`]) built from [`Coordinate`]s. Every coordinate
//! knows the [`Reference`](geo::Reference) it is expressed in and can be converted into another one with
//! [`Coordinate::to_reference`].

pub mod cartesian;
pub mod error;
pub mod geo;

mod collection;
mod coordinate;
mod geometry;
mod geometry_type;
mod line_string;
mod multi_line_string;
mod multi_point;
mod multi_polygon;
mod polygon;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use collection::GeometryCollection;
pub use coordinate::Coordinate;
pub use geo::Reference;
pub use geometry::Geometry;
pub use geometry_type::GeometryType;
pub use line_string::{LineString, Ring};
pub use multi_line_string::MultiLineString;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use polygon::Polygon;
