//! Geographic coordinates (latitude and longitude, see [`GeoPoint`]), the coordinate references understood
//! on the wire (see [`Reference`]) and conversion between them (see [`Projection`]).

mod datum;
mod point;
mod projection;
mod reference;
mod web_mercator;

pub use datum::Datum;
pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
pub use projection::Projection;
pub use reference::Reference;
pub use web_mercator::WebMercator;
