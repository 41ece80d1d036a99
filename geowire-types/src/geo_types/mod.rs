//! Conversion to and from [`geo_types`] geometries.
//!
//! `geo_types` coordinates are 2d only, so `z` and `m` are dropped when converting into `geo_types`.

use geo_types::{coord, Coord};

use crate::error::GeowireTypesError;
use crate::geo::Reference;
use crate::{Coordinate, Geometry, LineString, Polygon, Ring};

impl From<&Coordinate> for Coord<f64> {
    fn from(value: &Coordinate) -> Self {
        coord!(x: value.x(), y: value.y())
    }
}

impl From<&LineString> for geo_types::LineString<f64> {
    fn from(value: &LineString) -> Self {
        value.iter().map(Coord::from).collect()
    }
}

impl From<&Polygon> for geo_types::Polygon<f64> {
    fn from(value: &Polygon) -> Self {
        let exterior = value
            .exterior()
            .map(|r| r.as_line_string().into())
            .unwrap_or_else(|| geo_types::LineString::new(vec![]));
        let interiors = value
            .interiors()
            .iter()
            .map(|r| r.as_line_string().into())
            .collect();
        geo_types::Polygon::new(exterior, interiors)
    }
}

impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(value: &Geometry) -> Self {
        match value {
            Geometry::Point(c) => geo_types::Point(c.into()).into(),
            Geometry::LineString(line) => geo_types::LineString::from(line).into(),
            Geometry::Polygon(polygon) => geo_types::Polygon::from(polygon).into(),
            Geometry::MultiPoint(points) => geo_types::MultiPoint(
                points
                    .points()
                    .iter()
                    .map(|c| geo_types::Point(c.into()))
                    .collect(),
            )
            .into(),
            Geometry::MultiLineString(lines) => {
                geo_types::MultiLineString(lines.lines().iter().map(Into::into).collect()).into()
            }
            Geometry::MultiPolygon(polygons) => {
                geo_types::MultiPolygon(polygons.polygons().iter().map(Into::into).collect())
                    .into()
            }
            Geometry::GeometryCollection(collection) => {
                geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection(
                    collection.geometries().iter().map(Into::into).collect(),
                ))
            }
        }
    }
}

impl Geometry {
    /// Converts a `geo_types` geometry into [`Geometry`] with coordinates tagged with the given reference.
    ///
    /// `Line`, `Rect` and `Triangle` are converted into a line string and polygons respectively. Fails if a
    /// polygon ring has less than 4 coordinates.
    pub fn from_geo_types(
        geometry: &geo_types::Geometry<f64>,
        reference: Reference,
    ) -> Result<Self, GeowireTypesError> {
        let convert_line = |line: &geo_types::LineString<f64>| {
            LineString::new(
                line.coords()
                    .map(|c| Coordinate::new(c.x, c.y, reference))
                    .collect(),
            )
        };
        let convert_polygon =
            |polygon: &geo_types::Polygon<f64>| -> Result<Polygon, GeowireTypesError> {
                if polygon.exterior().0.is_empty() {
                    return Ok(Polygon::default());
                }

                let exterior = Ring::try_from(convert_line(polygon.exterior()))?;
                let interiors = polygon
                    .interiors()
                    .iter()
                    .map(|l| Ring::try_from(convert_line(l)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Polygon::new(exterior, interiors))
            };

        Ok(match geometry {
            geo_types::Geometry::Point(p) => Coordinate::new(p.x(), p.y(), reference).into(),
            geo_types::Geometry::Line(line) => LineString::new(vec![
                Coordinate::new(line.start.x, line.start.y, reference),
                Coordinate::new(line.end.x, line.end.y, reference),
            ])
            .into(),
            geo_types::Geometry::LineString(line) => convert_line(line).into(),
            geo_types::Geometry::Polygon(polygon) => convert_polygon(polygon)?.into(),
            geo_types::Geometry::MultiPoint(points) => Geometry::MultiPoint(
                points
                    .iter()
                    .map(|p| Coordinate::new(p.x(), p.y(), reference))
                    .collect::<Vec<_>>()
                    .into(),
            ),
            geo_types::Geometry::MultiLineString(lines) => Geometry::MultiLineString(
                lines.iter().map(convert_line).collect::<Vec<_>>().into(),
            ),
            geo_types::Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(convert_polygon)
                    .collect::<Result<Vec<_>, _>>()?
                    .into(),
            ),
            geo_types::Geometry::GeometryCollection(collection) => Geometry::GeometryCollection(
                collection
                    .iter()
                    .map(|g| Geometry::from_geo_types(g, reference))
                    .collect::<Result<Vec<_>, _>>()?
                    .into(),
            ),
            geo_types::Geometry::Rect(rect) => convert_polygon(&rect.to_polygon())?.into(),
            geo_types::Geometry::Triangle(triangle) => {
                convert_polygon(&triangle.to_polygon())?.into()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use geo_types::{line_string, point, polygon};

    use super::*;

    #[test]
    fn polygon_to_geo_types_and_back() {
        let source: geo_types::Geometry<f64> = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
        ]
        .into();

        let geometry = Geometry::from_geo_types(&source, Reference::Geographic).unwrap();
        let Geometry::Polygon(polygon) = &geometry else {
            panic!("invalid geometry type");
        };
        assert_eq!(polygon.exterior().unwrap().len(), 5);
        assert!(polygon.interiors().is_empty());

        assert_eq!(geo_types::Geometry::from(&geometry), source);
    }

    #[test]
    fn z_is_dropped() {
        let geometry = Geometry::Point(
            Coordinate::new(1.0, 2.0, Reference::Geographic).with_z(3.0),
        );
        assert_eq!(
            geo_types::Geometry::from(&geometry),
            geo_types::Geometry::Point(point!(x: 1.0, y: 2.0))
        );
    }

    #[test]
    fn line_becomes_line_string() {
        let line = geo_types::Line::new(coord!(x: 0.0, y: 0.0), coord!(x: 1.0, y: 1.0));
        let geometry =
            Geometry::from_geo_types(&line.into(), Reference::Projected).unwrap();
        assert_eq!(
            geo_types::Geometry::from(&geometry),
            geo_types::Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)])
        );
        assert_eq!(geometry.reference(), Some(Reference::Projected));
    }

    #[test]
    fn degenerate_ring_fails() {
        let source: geo_types::Geometry<f64> = geo_types::Polygon::new(
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            vec![],
        )
        .into();
        assert!(Geometry::from_geo_types(&source, Reference::Geographic).is_err());
    }
}
