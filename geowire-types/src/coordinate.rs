use serde::{Deserialize, Serialize};

use crate::cartesian::{CartesianPoint2d, Point2};
use crate::error::GeowireTypesError;
use crate::geo::{GeoPoint, GeoPoint2d, NewGeoPoint, Reference};

/// A single position: two required ordinates, optional altitude (`z`) and linear reference (`m`), and the
/// coordinate system the ordinates are expressed in.
///
/// For [`Reference::Geographic`] `x` is longitude and `y` is latitude, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    x: f64,
    y: f64,
    z: Option<f64>,
    m: Option<f64>,
    reference: Reference,
}

impl Coordinate {
    /// Creates a 2d coordinate.
    pub const fn new(x: f64, y: f64, reference: Reference) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
            reference,
        }
    }

    /// Returns a copy of the coordinate with the given altitude.
    pub const fn with_z(self, z: f64) -> Self {
        Self { z: Some(z), ..self }
    }

    /// Returns a copy of the coordinate with the given linear reference.
    pub const fn with_m(self, m: f64) -> Self {
        Self { m: Some(m), ..self }
    }

    /// Returns a copy of the coordinate with the given optional ordinates replaced.
    pub const fn with_zm(self, z: Option<f64>, m: Option<f64>) -> Self {
        Self { z, m, ..self }
    }

    /// First ordinate (longitude or easting).
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Second ordinate (latitude or northing).
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Altitude.
    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// Linear reference.
    pub fn m(&self) -> Option<f64> {
        self.m
    }

    /// Coordinate system of the ordinates.
    pub fn reference(&self) -> Reference {
        self.reference
    }

    /// Whether the coordinate carries an altitude.
    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    /// Whether the coordinate carries a linear reference.
    pub fn has_m(&self) -> bool {
        self.m.is_some()
    }

    /// Whether both required ordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if `x` and `y` of both coordinates are equal. `z`, `m` and the reference are ignored.
    pub fn same_position(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Converts the coordinate into the `target` reference. `z` and `m` are carried over unchanged.
    ///
    /// Conversion into the same reference is an identity. Conversion between the unspecified reference and any
    /// other reference is an error, see [`Reference::can_convert_to`].
    pub fn to_reference(&self, target: Reference) -> Result<Coordinate, GeowireTypesError> {
        if self.reference == target {
            return Ok(*self);
        }

        let mismatch = GeowireTypesError::ReferenceMismatch {
            from: self.reference,
            to: target,
        };
        let failed = GeowireTypesError::Projection {
            x: self.x,
            y: self.y,
        };

        let (x, y) = match (self.reference, target) {
            (Reference::Geographic, Reference::Projected) => {
                let projection = target
                    .get_projection::<GeoPoint2d, Point2>()
                    .ok_or(mismatch)?;
                let projected = projection
                    .project(&GeoPoint2d::lonlat(self.x, self.y))
                    .ok_or(failed)?;
                (projected.x(), projected.y())
            }
            (Reference::Projected, Reference::Geographic) => {
                let projection = self
                    .reference
                    .get_projection::<GeoPoint2d, Point2>()
                    .ok_or(mismatch)?;
                let geographic = projection
                    .unproject(&Point2::new(self.x, self.y))
                    .ok_or(failed)?;
                (geographic.lon(), geographic.lat())
            }
            _ => return Err(mismatch),
        };

        Ok(Self {
            x,
            y,
            reference: target,
            ..*self
        })
    }
}

impl GeoPoint for Coordinate {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.y
    }

    fn lon(&self) -> f64 {
        self.x
    }
}

impl CartesianPoint2d for Coordinate {
    type Num = f64;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn to_same_reference_is_identity() {
        let coordinate = Coordinate::new(12.5, 41.9, Reference::Geographic).with_z(21.0);
        assert_eq!(
            coordinate.to_reference(Reference::Geographic).unwrap(),
            coordinate
        );

        let raw = Coordinate::new(1e9, -1e9, Reference::Unspecified);
        assert_eq!(raw.to_reference(Reference::Unspecified).unwrap(), raw);
    }

    #[test]
    fn projection_keeps_z_and_m() {
        let coordinate = Coordinate::new(90.0, 45.0, Reference::Geographic)
            .with_z(100.0)
            .with_m(7.0);
        let projected = coordinate.to_reference(Reference::Projected).unwrap();

        assert_eq!(projected.reference(), Reference::Projected);
        assert_abs_diff_eq!(projected.x(), 10_018_754.171394622, epsilon = 1e-6);
        assert_abs_diff_eq!(projected.y(), 5_621_521.486192066, epsilon = 1e-6);
        assert_eq!(projected.z(), Some(100.0));
        assert_eq!(projected.m(), Some(7.0));

        let restored = projected.to_reference(Reference::Geographic).unwrap();
        assert_abs_diff_eq!(restored.x(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(restored.y(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn unspecified_cannot_be_converted() {
        let coordinate = Coordinate::new(1.0, 2.0, Reference::Unspecified);
        assert_matches!(
            coordinate.to_reference(Reference::Geographic),
            Err(GeowireTypesError::ReferenceMismatch {
                from: Reference::Unspecified,
                to: Reference::Geographic
            })
        );

        let coordinate = Coordinate::new(1.0, 2.0, Reference::Projected);
        assert_matches!(
            coordinate.to_reference(Reference::Unspecified),
            Err(GeowireTypesError::ReferenceMismatch { .. })
        );
    }

    #[test]
    fn pole_cannot_be_projected() {
        let coordinate = Coordinate::new(0.0, -90.0, Reference::Geographic);
        assert_matches!(
            coordinate.to_reference(Reference::Projected),
            Err(GeowireTypesError::Projection { .. })
        );
    }
}
