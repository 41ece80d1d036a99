use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Point in a 2-dimensional cartesian coordinate space, e.g. web-Mercator meters.
pub trait CartesianPoint2d {
    /// Numeric type of the ordinates.
    type Num: Float;

    /// Easting.
    fn x(&self) -> Self::Num;
    /// Northing.
    fn y(&self) -> Self::Num;
}

/// Cartesian point that can be constructed from its ordinates.
pub trait NewCartesianPoint2d<Num = f64>: CartesianPoint2d<Num = Num> {
    /// Creates a new point.
    fn new(x: Num, y: Num) -> Self;
}

/// A point in 2-dimensional cartesian coordinate space.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point2<Num = f64> {
    x: Num,
    y: Num,
}

impl<Num> Point2<Num> {
    /// Creates a new point with the given coordinates.
    pub const fn new(x: Num, y: Num) -> Self {
        Self { x, y }
    }
}

impl<Num: Float> CartesianPoint2d for Point2<Num> {
    type Num = Num;

    fn x(&self) -> Num {
        self.x
    }

    fn y(&self) -> Num {
        self.y
    }
}

impl<Num: Float> NewCartesianPoint2d<Num> for Point2<Num> {
    fn new(x: Num, y: Num) -> Self {
        Point2::new(x, y)
    }
}
