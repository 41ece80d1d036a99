use geowire_types::{Coordinate, Geometry, GeometryType, LineString, Polygon};

use super::{MIN_LIST_GEOMETRY_SIZE, MIN_POINT_SIZE};
use crate::cursor::{ByteCursor, ByteOrder};
use crate::error::CodecError;
use crate::options::{DecodeContext, DecodeOptions};
use crate::type_code::{Dimensions, TypeWord};

/// Decodes a WKB (or extended WKB) buffer.
///
/// The source reference is taken from [`DecodeOptions::source`] or, if it is not set, from the SRID of the
/// top level geometry. Coordinates are converted into [`DecodeOptions::target`].
///
/// The whole buffer must be consumed by the geometry.
pub fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<Geometry, CodecError> {
    let mut reader = WkbReader {
        cursor: ByteCursor::new(bytes),
        context: DecodeContext::new(options)?,
    };

    let geometry = reader.read_geometry(0)?;
    if !reader.cursor.is_at_end() {
        return Err(CodecError::DataCorrupted(format!(
            "{} unexpected bytes after the end of the geometry",
            reader.cursor.remaining()
        )));
    }

    reader.context.finish(geometry)
}

struct WkbReader<'a> {
    cursor: ByteCursor<'a>,
    context: DecodeContext<'a>,
}

#[derive(Debug, Clone, Copy)]
struct Header {
    order: ByteOrder,
    geometry_type: GeometryType,
    dimensions: Dimensions,
}

impl WkbReader<'_> {
    fn read_geometry(&mut self, depth: usize) -> Result<Geometry, CodecError> {
        let header = self.read_header(depth)?;
        let Header {
            order,
            geometry_type,
            dimensions,
        } = header;

        Ok(match geometry_type {
            GeometryType::Point => Geometry::Point(self.read_coordinate(order, dimensions)?),
            GeometryType::LineString => {
                Geometry::LineString(self.read_line_string(order, dimensions)?)
            }
            GeometryType::Polygon => Geometry::Polygon(self.read_polygon(order, dimensions)?),
            GeometryType::MultiPoint => {
                Geometry::MultiPoint(self.read_multi_point(order, depth)?.into())
            }
            GeometryType::MultiLineString => {
                let lines = self.read_members(order, depth, |member| match member {
                    Geometry::LineString(line) => Ok(line),
                    other => Err(invalid_member(GeometryType::MultiLineString, &other)),
                })?;
                Geometry::MultiLineString(lines.into())
            }
            GeometryType::MultiPolygon => {
                let polygons = self.read_members(order, depth, |member| match member {
                    Geometry::Polygon(polygon) => Ok(polygon),
                    other => Err(invalid_member(GeometryType::MultiPolygon, &other)),
                })?;
                Geometry::MultiPolygon(polygons.into())
            }
            GeometryType::GeometryCollection => {
                Geometry::GeometryCollection(self.read_members(order, depth, Ok)?.into())
            }
        })
    }

    fn read_header(&mut self, depth: usize) -> Result<Header, CodecError> {
        self.context.check_depth(depth)?;

        let offset = self.cursor.position();
        let order = ByteOrder::from_marker(self.cursor.read_u8()?)?;
        let type_word = TypeWord::parse(self.cursor.read_u32(order)?)?;
        if type_word.has_srid {
            let srid = self.cursor.read_i32(order)?;
            self.context.embedded_srid(srid)?;
        }
        self.context.require_source()?;

        log::trace!(
            "WKB {} header at offset {offset}, depth {depth}",
            type_word.geometry_type
        );

        Ok(Header {
            order,
            geometry_type: type_word.geometry_type,
            dimensions: type_word.dimensions,
        })
    }

    fn read_coordinate(
        &mut self,
        order: ByteOrder,
        dimensions: Dimensions,
    ) -> Result<Coordinate, CodecError> {
        let x = self.cursor.read_f64(order)?;
        let y = self.cursor.read_f64(order)?;
        let z = match dimensions.has_z {
            true => Some(self.cursor.read_f64(order)?),
            false => None,
        };
        let m = match dimensions.has_m {
            true => Some(self.cursor.read_f64(order)?),
            false => None,
        };

        if !x.is_finite() || !y.is_finite() {
            return Err(CodecError::InvalidGeometry(format!(
                "coordinate ({x}, {y}) is not finite"
            )));
        }

        self.context.coordinate(x, y, z, m)
    }

    fn read_line_string(
        &mut self,
        order: ByteOrder,
        dimensions: Dimensions,
    ) -> Result<LineString, CodecError> {
        let count = self.read_count(order)?;
        let mut points = Vec::with_capacity(self.capacity(count, dimensions.ordinates() * 8));
        for _ in 0..count {
            points.push(self.read_coordinate(order, dimensions)?);
        }

        Ok(LineString::new(points))
    }

    fn read_polygon(
        &mut self,
        order: ByteOrder,
        dimensions: Dimensions,
    ) -> Result<Polygon, CodecError> {
        let count = self.read_count(order)?;
        let mut rings = Vec::with_capacity(self.capacity(count, 4));
        for _ in 0..count {
            rings.push(self.read_line_string(order, dimensions)?.into_ring()?);
        }

        Ok(Polygon::from_rings(rings))
    }

    fn read_multi_point(
        &mut self,
        order: ByteOrder,
        depth: usize,
    ) -> Result<Vec<Coordinate>, CodecError> {
        let count = self.read_count(order)?;
        let mut points = Vec::with_capacity(self.capacity(count, MIN_POINT_SIZE));
        for index in 0..count {
            if self.cursor.is_at_end() && self.context.tolerate_short_multipoint() {
                log::warn!(
                    "WKB multipoint declares {count} points, but the data ends after {index}"
                );
                break;
            }

            match self.read_geometry(depth + 1)? {
                Geometry::Point(coordinate) => points.push(coordinate),
                other => return Err(invalid_member(GeometryType::MultiPoint, &other)),
            }
        }

        Ok(points)
    }

    fn read_members<T>(
        &mut self,
        order: ByteOrder,
        depth: usize,
        mut accept: impl FnMut(Geometry) -> Result<T, CodecError>,
    ) -> Result<Vec<T>, CodecError> {
        let count = self.read_count(order)?;
        let mut members = Vec::with_capacity(self.capacity(count, MIN_LIST_GEOMETRY_SIZE));
        for _ in 0..count {
            members.push(accept(self.read_geometry(depth + 1)?)?);
        }

        Ok(members)
    }

    fn read_count(&mut self, order: ByteOrder) -> Result<u32, CodecError> {
        self.cursor.read_u32(order)
    }

    /// Capacity to reserve for `count` elements, limited by what the rest of the buffer can hold.
    fn capacity(&self, count: u32, min_element_size: usize) -> usize {
        (count as usize).min(self.cursor.remaining() / min_element_size)
    }
}

fn invalid_member(parent: GeometryType, member: &Geometry) -> CodecError {
    CodecError::InvalidGeometry(format!(
        "{parent} cannot contain {}",
        member.geometry_type()
    ))
}
