use geowire_types::{Coordinate, Geometry, GeometryType, LineString, Polygon, Reference};

use crate::cursor::ByteWriter;
use crate::error::CodecError;
use crate::options::{encode_coordinate, EncodeOptions};
use crate::type_code::{Dimensions, TypeWord};

/// Encodes a geometry as WKB.
///
/// If [`EncodeOptions::target`] is set, coordinates are converted into it and its SRID, unless it is
/// [`Reference::Unspecified`], is written with the top level geometry (extended WKB).
///
/// Dimensions of every geometry are taken from its first coordinate; a
/// coordinate that lacks `z` or `m` present in the first one is written with `NaN` in its place.
pub fn encode(geometry: &Geometry, options: &EncodeOptions) -> Result<Vec<u8>, CodecError> {
    let mut writer = WkbWriter {
        buffer: ByteWriter::new(options.byte_order),
        target: options.target,
    };

    writer.write_geometry(geometry, options.srid())?;

    let bytes = writer.buffer.into_inner();
    log::debug!(
        "Encoded {} into {} WKB bytes",
        geometry.geometry_type(),
        bytes.len()
    );

    Ok(bytes)
}

struct WkbWriter {
    buffer: ByteWriter,
    target: Option<Reference>,
}

impl WkbWriter {
    fn write_geometry(&mut self, geometry: &Geometry, srid: Option<i32>) -> Result<(), CodecError> {
        match geometry {
            Geometry::Point(coordinate) => self.write_point(coordinate, srid),
            Geometry::LineString(line) => self.write_line_string(line, srid),
            Geometry::Polygon(polygon) => self.write_polygon(polygon, srid),
            Geometry::MultiPoint(multi_point) => {
                let points = multi_point.points();
                self.write_header(GeometryType::MultiPoint, Dimensions::of(points.first()), srid);
                self.write_count(points.len())?;
                for point in points {
                    self.write_point(point, None)?;
                }
                Ok(())
            }
            Geometry::MultiLineString(multi_line) => {
                let dimensions = Dimensions::of(geometry.first_coordinate());
                self.write_header(GeometryType::MultiLineString, dimensions, srid);
                self.write_count(multi_line.lines().len())?;
                for line in multi_line.lines() {
                    self.write_line_string(line, None)?;
                }
                Ok(())
            }
            Geometry::MultiPolygon(multi_polygon) => {
                let dimensions = Dimensions::of(geometry.first_coordinate());
                self.write_header(GeometryType::MultiPolygon, dimensions, srid);
                self.write_count(multi_polygon.polygons().len())?;
                for polygon in multi_polygon.polygons() {
                    self.write_polygon(polygon, None)?;
                }
                Ok(())
            }
            Geometry::GeometryCollection(collection) => {
                let dimensions = Dimensions::of(geometry.first_coordinate());
                self.write_header(GeometryType::GeometryCollection, dimensions, srid);
                self.write_count(collection.geometries().len())?;
                for member in collection.geometries() {
                    self.write_geometry(member, None)?;
                }
                Ok(())
            }
        }
    }

    fn write_point(
        &mut self,
        coordinate: &Coordinate,
        srid: Option<i32>,
    ) -> Result<(), CodecError> {
        let dimensions = Dimensions::of(Some(coordinate));
        self.write_header(GeometryType::Point, dimensions, srid);
        self.write_coordinate(coordinate, dimensions)
    }

    fn write_line_string(
        &mut self,
        line: &LineString,
        srid: Option<i32>,
    ) -> Result<(), CodecError> {
        let dimensions = Dimensions::of(line.first());
        self.write_header(GeometryType::LineString, dimensions, srid);
        self.write_coordinates(line.points(), dimensions)
    }

    fn write_polygon(&mut self, polygon: &Polygon, srid: Option<i32>) -> Result<(), CodecError> {
        let dimensions = Dimensions::of(polygon.rings().first().and_then(|ring| ring.first()));
        self.write_header(GeometryType::Polygon, dimensions, srid);
        self.write_count(polygon.rings().len())?;
        for ring in polygon.rings() {
            self.write_coordinates(ring.points(), dimensions)?;
        }

        Ok(())
    }

    fn write_header(
        &mut self,
        geometry_type: GeometryType,
        dimensions: Dimensions,
        srid: Option<i32>,
    ) {
        let type_word = TypeWord {
            geometry_type,
            dimensions,
            has_srid: srid.is_some(),
        };

        self.buffer.write_u8(self.buffer.order().marker());
        self.buffer.write_u32(type_word.to_word());
        if let Some(srid) = srid {
            self.buffer.write_i32(srid);
        }
    }

    fn write_count(&mut self, count: usize) -> Result<(), CodecError> {
        let count = u32::try_from(count).map_err(|_| {
            CodecError::InvalidGeometry(format!("{count} elements cannot be written as WKB"))
        })?;
        self.buffer.write_u32(count);
        Ok(())
    }

    fn write_coordinates(
        &mut self,
        coordinates: &[Coordinate],
        dimensions: Dimensions,
    ) -> Result<(), CodecError> {
        self.write_count(coordinates.len())?;
        for coordinate in coordinates {
            self.write_coordinate(coordinate, dimensions)?;
        }

        Ok(())
    }

    fn write_coordinate(
        &mut self,
        coordinate: &Coordinate,
        dimensions: Dimensions,
    ) -> Result<(), CodecError> {
        let coordinate = encode_coordinate(coordinate, self.target)?;

        self.buffer.write_f64(coordinate.x());
        self.buffer.write_f64(coordinate.y());
        if dimensions.has_z {
            self.buffer.write_f64(coordinate.z().unwrap_or(f64::NAN));
        }
        if dimensions.has_m {
            self.buffer.write_f64(coordinate.m().unwrap_or(f64::NAN));
        }

        Ok(())
    }
}
