use geowire_types::{Coordinate, Geometry, LineString, Polygon, Reference};

use crate::error::CodecError;
use crate::options::{encode_coordinate, EncodeOptions};
use crate::type_code::Dimensions;

/// Encodes a geometry as WKT.
///
/// If [`EncodeOptions::target`] is set, coordinates are converted into it and, unless it is
/// [`Reference::Unspecified`], the text is prefixed with `SRID=<srid>;`. Numbers are written in the
/// shortest form that reads back to the same value.
pub fn encode(geometry: &Geometry, options: &EncodeOptions) -> Result<String, CodecError> {
    let mut writer = WktWriter {
        out: String::new(),
        target: options.target,
    };

    if let Some(srid) = options.srid() {
        writer.out.push_str(&format!("SRID={srid};"));
    }
    writer.write_geometry(geometry)?;

    log::debug!(
        "Encoded {} into {} WKT characters",
        geometry.geometry_type(),
        writer.out.len()
    );

    Ok(writer.out)
}

struct WktWriter {
    out: String,
    target: Option<Reference>,
}

impl WktWriter {
    fn write_geometry(&mut self, geometry: &Geometry) -> Result<(), CodecError> {
        let dimensions = Dimensions::of(geometry.first_coordinate());
        self.out.push_str(geometry.geometry_type().name());
        if has_no_members(geometry) {
            self.out.push_str(" EMPTY");
            return Ok(());
        }

        match dimensions.wkt_suffix() {
            "" => {}
            suffix => {
                self.out.push(' ');
                self.out.push_str(suffix);
                self.out.push(' ');
            }
        }

        match geometry {
            Geometry::Point(coordinate) => {
                self.out.push('(');
                self.write_coordinate(coordinate, dimensions)?;
                self.out.push(')');
                Ok(())
            }
            Geometry::LineString(line) => self.write_line_string(line, dimensions),
            Geometry::Polygon(polygon) => self.write_polygon(polygon, dimensions),
            Geometry::MultiPoint(multi_point) => {
                self.write_list(multi_point.points(), |writer, point| {
                    writer.write_coordinate(point, dimensions)
                })
            }
            Geometry::MultiLineString(multi_line) => {
                self.write_list(multi_line.lines(), |writer, line| {
                    writer.write_line_string(line, dimensions)
                })
            }
            Geometry::MultiPolygon(multi_polygon) => {
                self.write_list(multi_polygon.polygons(), |writer, polygon| {
                    writer.write_polygon(polygon, dimensions)
                })
            }
            Geometry::GeometryCollection(collection) => {
                self.write_list(collection.geometries(), |writer, member| {
                    writer.write_geometry(member)
                })
            }
        }
    }

    fn write_list<T>(
        &mut self,
        items: &[T],
        mut write_item: impl FnMut(&mut Self, &T) -> Result<(), CodecError>,
    ) -> Result<(), CodecError> {
        self.out.push('(');
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            write_item(self, item)?;
        }
        self.out.push(')');

        Ok(())
    }

    fn write_line_string(
        &mut self,
        line: &LineString,
        dimensions: Dimensions,
    ) -> Result<(), CodecError> {
        if line.is_empty() {
            self.out.push_str("EMPTY");
            return Ok(());
        }

        self.write_list(line.points(), |writer, point| {
            writer.write_coordinate(point, dimensions)
        })
    }

    fn write_polygon(
        &mut self,
        polygon: &Polygon,
        dimensions: Dimensions,
    ) -> Result<(), CodecError> {
        if polygon.is_empty() {
            self.out.push_str("EMPTY");
            return Ok(());
        }

        self.write_list(polygon.rings(), |writer, ring| {
            writer.write_list(ring.points(), |writer, point| {
                writer.write_coordinate(point, dimensions)
            })
        })
    }

    fn write_coordinate(
        &mut self,
        coordinate: &Coordinate,
        dimensions: Dimensions,
    ) -> Result<(), CodecError> {
        let coordinate = encode_coordinate(coordinate, self.target)?;

        self.write_number(coordinate.x());
        self.out.push(' ');
        self.write_number(coordinate.y());
        if dimensions.has_z {
            self.out.push(' ');
            self.write_number(coordinate.z().unwrap_or(f64::NAN));
        }
        if dimensions.has_m {
            self.out.push(' ');
            self.write_number(coordinate.m().unwrap_or(f64::NAN));
        }

        Ok(())
    }

    fn write_number(&mut self, value: f64) {
        self.out.push_str(&value.to_string());
    }
}

/// Geometries written as `EMPTY`. A collection with empty members keeps them.
fn has_no_members(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::Point(_) => false,
        Geometry::LineString(line) => line.is_empty(),
        Geometry::Polygon(polygon) => polygon.is_empty(),
        Geometry::MultiPoint(multi_point) => multi_point.points().is_empty(),
        Geometry::MultiLineString(multi_line) => multi_line.lines().is_empty(),
        Geometry::MultiPolygon(multi_polygon) => multi_polygon.polygons().is_empty(),
        Geometry::GeometryCollection(collection) => collection.geometries().is_empty(),
    }
}
