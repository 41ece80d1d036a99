use serde::{Deserialize, Serialize};

use crate::collection::GeometryCollection;
use crate::coordinate::Coordinate;
use crate::error::GeowireTypesError;
use crate::geo::Reference;
use crate::geometry_type::GeometryType;
use crate::line_string::{LineString, Ring};
use crate::multi_line_string::MultiLineString;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::polygon::Polygon;

/// Any of the simple features geometries.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Geometry {
    /// Single position.
    Point(Coordinate),
    /// Sequence of positions.
    LineString(LineString),
    /// Outer ring with optional holes.
    Polygon(Polygon),
    /// Set of points.
    MultiPoint(MultiPoint),
    /// Set of line strings.
    MultiLineString(MultiLineString),
    /// Set of polygons.
    MultiPolygon(MultiPolygon),
    /// Heterogeneous set of geometries.
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Kind of the geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Iterates over all coordinates of the geometry in the order they are stored.
    pub fn coordinates(&self) -> Box<dyn Iterator<Item = &Coordinate> + '_> {
        match self {
            Geometry::Point(c) => Box::new(std::iter::once(c)),
            Geometry::LineString(line) => Box::new(line.iter()),
            Geometry::Polygon(polygon) => Box::new(polygon.rings().iter().flat_map(|r| r.iter())),
            Geometry::MultiPoint(points) => Box::new(points.points().iter()),
            Geometry::MultiLineString(lines) => {
                Box::new(lines.lines().iter().flat_map(|l| l.iter()))
            }
            Geometry::MultiPolygon(polygons) => Box::new(
                polygons
                    .polygons()
                    .iter()
                    .flat_map(|p| p.rings().iter())
                    .flat_map(|r| r.iter()),
            ),
            Geometry::GeometryCollection(collection) => Box::new(
                collection
                    .geometries()
                    .iter()
                    .flat_map(|g| g.coordinates()),
            ),
        }
    }

    /// The first coordinate of the geometry. Codecs use it as the representative coordinate to decide which
    /// optional ordinates the geometry carries.
    pub fn first_coordinate(&self) -> Option<&Coordinate> {
        self.coordinates().next()
    }

    /// Reference of the geometry coordinates, `None` if the geometry has no coordinates.
    pub fn reference(&self) -> Option<Reference> {
        self.first_coordinate().map(Coordinate::reference)
    }

    /// Returns true if the geometry contains no coordinates.
    pub fn is_empty(&self) -> bool {
        self.first_coordinate().is_none()
    }

    /// Builds a new geometry of the same structure with every coordinate replaced by the result of `f`.
    ///
    /// Rings are validated again after the mapping.
    pub fn try_map_coords<E, F>(&self, f: &mut F) -> Result<Geometry, E>
    where
        F: FnMut(&Coordinate) -> Result<Coordinate, E>,
        E: From<GeowireTypesError>,
    {
        Ok(match self {
            Geometry::Point(c) => Geometry::Point(f(c)?),
            Geometry::LineString(line) => Geometry::LineString(map_line(line, f)?),
            Geometry::Polygon(polygon) => Geometry::Polygon(map_polygon(polygon, f)?),
            Geometry::MultiPoint(points) => Geometry::MultiPoint(
                points
                    .points()
                    .iter()
                    .map(&mut *f)
                    .collect::<Result<Vec<_>, E>>()?
                    .into(),
            ),
            Geometry::MultiLineString(lines) => Geometry::MultiLineString(
                lines
                    .lines()
                    .iter()
                    .map(|l| map_line(l, f))
                    .collect::<Result<Vec<_>, E>>()?
                    .into(),
            ),
            Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .polygons()
                    .iter()
                    .map(|p| map_polygon(p, f))
                    .collect::<Result<Vec<_>, E>>()?
                    .into(),
            ),
            Geometry::GeometryCollection(collection) => Geometry::GeometryCollection(
                collection
                    .geometries()
                    .iter()
                    .map(|g| g.try_map_coords(f))
                    .collect::<Result<Vec<_>, E>>()?
                    .into(),
            ),
        })
    }

    /// Converts all coordinates of the geometry into the `target` reference.
    pub fn to_reference(&self, target: Reference) -> Result<Geometry, GeowireTypesError> {
        self.try_map_coords(&mut |c: &Coordinate| c.to_reference(target))
    }
}

fn map_line<E, F>(line: &LineString, f: &mut F) -> Result<LineString, E>
where
    F: FnMut(&Coordinate) -> Result<Coordinate, E>,
{
    Ok(LineString::new(
        line.iter().map(f).collect::<Result<Vec<_>, E>>()?,
    ))
}

fn map_polygon<E, F>(polygon: &Polygon, f: &mut F) -> Result<Polygon, E>
where
    F: FnMut(&Coordinate) -> Result<Coordinate, E>,
    E: From<GeowireTypesError>,
{
    let rings = polygon
        .rings()
        .iter()
        .map(|ring| -> Result<Ring, E> { Ok(map_line(ring.as_line_string(), f)?.into_ring()?) })
        .collect::<Result<Vec<Ring>, E>>()?;
    Ok(Polygon::from_rings(rings))
}

impl From<Coordinate> for Geometry {
    fn from(value: Coordinate) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Self::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Self::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Self::GeometryCollection(value)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn geo(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y, Reference::Geographic)
    }

    fn square() -> Polygon {
        Polygon::new(
            Ring::try_from(vec![
                geo(0.0, 0.0),
                geo(0.0, 1.0),
                geo(1.0, 1.0),
                geo(1.0, 0.0),
                geo(0.0, 0.0),
            ])
            .unwrap(),
            vec![],
        )
    }

    #[test]
    fn coordinates_of_nested_collection() {
        let geometry = Geometry::GeometryCollection(
            vec![
                Geometry::Point(geo(5.0, 5.0)),
                Geometry::GeometryCollection(
                    vec![Geometry::MultiPolygon(vec![square()].into())].into(),
                ),
            ]
            .into(),
        );

        assert_eq!(geometry.coordinates().count(), 6);
        assert_eq!(geometry.first_coordinate(), Some(&geo(5.0, 5.0)));
        assert_eq!(geometry.reference(), Some(Reference::Geographic));
        assert!(!geometry.is_empty());
    }

    #[test]
    fn empty_geometries() {
        assert!(Geometry::LineString(LineString::default()).is_empty());
        assert!(Geometry::Polygon(Polygon::default()).is_empty());
        assert!(
            Geometry::MultiLineString(vec![LineString::default()].into()).is_empty(),
            "a set of empty lines has no coordinates"
        );
        assert_eq!(Geometry::MultiPoint(MultiPoint::default()).reference(), None);
    }

    #[test]
    fn to_reference_keeps_structure() {
        let geometry = Geometry::Polygon(square());
        let projected = geometry.to_reference(Reference::Projected).unwrap();

        let Geometry::Polygon(polygon) = &projected else {
            panic!("invalid geometry type");
        };
        assert_eq!(polygon.rings().len(), 1);
        assert_eq!(polygon.exterior().unwrap().len(), 5);
        assert_eq!(projected.reference(), Some(Reference::Projected));

        let x = polygon.exterior().unwrap()[2].x();
        assert_abs_diff_eq!(x, 111_319.49079327357, epsilon = 1e-6);
    }

    #[test]
    fn geometry_type() {
        assert_eq!(
            Geometry::Point(geo(0.0, 0.0)).geometry_type(),
            GeometryType::Point
        );
        assert_eq!(
            Geometry::Polygon(square()).geometry_type().code(),
            3
        );
    }
}
