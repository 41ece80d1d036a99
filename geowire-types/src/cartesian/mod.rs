//! Points in planar (projected) coordinates.

mod point;

pub use point::{CartesianPoint2d, NewCartesianPoint2d, Point2};
