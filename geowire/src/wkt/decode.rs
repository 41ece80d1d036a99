use geowire_types::{
    Coordinate, Geometry, GeometryCollection, GeometryType, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Polygon,
};

use crate::error::CodecError;
use crate::options::{DecodeContext, DecodeOptions};
use crate::scanner::TextScanner;
use crate::type_code::{geometry_type_from_keyword, Dimensions};

/// Decodes a WKT (or extended WKT) string.
///
/// The source reference is taken from [`DecodeOptions::source`] or, if it is not set, from the `SRID=`
/// prefix. Coordinates are converted into [`DecodeOptions::target`].
///
/// Nothing but whitespace may follow the geometry.
pub fn decode(text: &str, options: &DecodeOptions) -> Result<Geometry, CodecError> {
    let mut reader = WktReader {
        scanner: TextScanner::new(text),
        context: DecodeContext::new(options)?,
    };

    reader.read_srid_prefix()?;
    reader.context.require_source()?;

    let geometry = reader.read_geometry(0, Dimensions::XY)?;
    if !reader.scanner.is_at_end() {
        return Err(reader.scanner.unexpected("end of text"));
    }

    reader.context.finish(geometry)
}

struct WktReader<'a> {
    scanner: TextScanner<'a>,
    context: DecodeContext<'a>,
}

impl WktReader<'_> {
    fn read_srid_prefix(&mut self) -> Result<(), CodecError> {
        if !self.scanner.consume_keyword("SRID") {
            return Ok(());
        }

        self.scanner.expect('=')?;
        let srid = self.scanner.scan_integer()?;
        self.scanner.expect(';')?;

        self.context.embedded_srid(srid)
    }

    /// Reads a keyword and the geometry it introduces. Members of a collection without their own dimension
    /// suffix use the dimensions of the collection.
    fn read_geometry(
        &mut self,
        depth: usize,
        inherited: Dimensions,
    ) -> Result<Geometry, CodecError> {
        self.context.check_depth(depth)?;

        let offset = self.scanner.position();
        let Some(word) = self.scanner.scan_word() else {
            return Err(self.scanner.unexpected("geometry keyword"));
        };
        let (geometry_type, mut dimensions) = parse_keyword(word)
            .ok_or_else(|| CodecError::UnexpectedType(format!("WKT keyword '{word}'")))?;

        if let Some(suffix) = self.scanner.peek_word().and_then(parse_suffix) {
            self.scanner.scan_word();
            dimensions.has_z |= suffix.has_z;
            dimensions.has_m |= suffix.has_m;
        }
        if dimensions == Dimensions::XY {
            dimensions = inherited;
        }

        log::trace!("WKT {geometry_type} at offset {offset}, depth {depth}");

        if self.scanner.consume_keyword("EMPTY") {
            return empty_geometry(geometry_type);
        }

        Ok(match geometry_type {
            GeometryType::Point => {
                self.scanner.expect('(')?;
                let coordinate = self.read_coordinate(dimensions)?;
                self.scanner.expect(')')?;
                Geometry::Point(coordinate)
            }
            GeometryType::LineString => {
                Geometry::LineString(self.read_line_string(dimensions)?)
            }
            GeometryType::Polygon => Geometry::Polygon(self.read_polygon(dimensions)?),
            GeometryType::MultiPoint => {
                let points = self.read_list(|reader| {
                    if reader.scanner.consume('(') {
                        let coordinate = reader.read_coordinate(dimensions)?;
                        reader.scanner.expect(')')?;
                        Ok(coordinate)
                    } else {
                        reader.read_coordinate(dimensions)
                    }
                })?;
                Geometry::MultiPoint(MultiPoint::from(points))
            }
            GeometryType::MultiLineString => {
                let lines = self.read_list(|reader| {
                    if reader.scanner.consume_keyword("EMPTY") {
                        Ok(LineString::new(vec![]))
                    } else {
                        reader.read_line_string(dimensions)
                    }
                })?;
                Geometry::MultiLineString(MultiLineString::from(lines))
            }
            GeometryType::MultiPolygon => {
                let polygons = self.read_list(|reader| {
                    if reader.scanner.consume_keyword("EMPTY") {
                        Ok(Polygon::from_rings(vec![]))
                    } else {
                        reader.read_polygon(dimensions)
                    }
                })?;
                Geometry::MultiPolygon(MultiPolygon::from(polygons))
            }
            GeometryType::GeometryCollection => {
                let members =
                    self.read_list(|reader| reader.read_geometry(depth + 1, dimensions))?;
                Geometry::GeometryCollection(GeometryCollection::from(members))
            }
        })
    }

    /// Reads `(item, item, ...)`.
    fn read_list<T>(
        &mut self,
        mut read_item: impl FnMut(&mut Self) -> Result<T, CodecError>,
    ) -> Result<Vec<T>, CodecError> {
        self.scanner.expect('(')?;
        let mut items = vec![];
        loop {
            items.push(read_item(self)?);
            if !self.scanner.consume(',') {
                break;
            }
        }
        self.scanner.expect(')')?;

        Ok(items)
    }

    fn read_line_string(&mut self, dimensions: Dimensions) -> Result<LineString, CodecError> {
        let points = self.read_list(|reader| reader.read_coordinate(dimensions))?;
        Ok(LineString::new(points))
    }

    fn read_polygon(&mut self, dimensions: Dimensions) -> Result<Polygon, CodecError> {
        let rings = self.read_list(|reader| {
            let line = reader.read_line_string(dimensions)?;
            Ok(line.into_ring()?)
        })?;
        Ok(Polygon::from_rings(rings))
    }

    /// Reads two to four numbers.
    ///
    /// If the dimensions declare exactly one of `z` and `m`, a third number is that ordinate and a fourth one
    /// is an error. Otherwise a third number is `z` and a fourth one is `m`.
    fn read_coordinate(&mut self, dimensions: Dimensions) -> Result<Coordinate, CodecError> {
        let x = self.scanner.scan_number()?;
        let y = self.scanner.scan_number()?;
        let third = self.scan_optional_number()?;
        let fourth = match third {
            Some(_) => self.scan_optional_number()?,
            None => None,
        };

        if !x.is_finite() || !y.is_finite() {
            return Err(CodecError::DataCorrupted(format!(
                "coordinate ({x}, {y}) before offset {} is not finite",
                self.scanner.position()
            )));
        }

        let (z, m) = match (dimensions.has_z, dimensions.has_m, fourth) {
            (true, false, Some(_)) | (false, true, Some(_)) => {
                return Err(CodecError::DataCorrupted(format!(
                    "coordinate before offset {} has more ordinates than {} declares",
                    self.scanner.position(),
                    dimensions.wkt_suffix()
                )));
            }
            (false, true, None) => (None, third),
            _ => (third, fourth),
        };

        self.context.coordinate(x, y, z, m)
    }

    fn scan_optional_number(&mut self) -> Result<Option<f64>, CodecError> {
        match self.scanner.peek() {
            None | Some(',') | Some(')') => Ok(None),
            Some(_) => Ok(Some(self.scanner.scan_number()?)),
        }
    }
}

/// Splits a keyword into the geometry type and the joined dimension suffix, e.g. `MULTIPOINTZM`.
fn parse_keyword(word: &str) -> Option<(GeometryType, Dimensions)> {
    let mut dimensions = Dimensions::XY;
    let mut base = word;
    if let Some(rest) = strip_suffix_ignore_case(base, "M") {
        dimensions.has_m = true;
        base = rest;
    }
    if let Some(rest) = strip_suffix_ignore_case(base, "Z") {
        dimensions.has_z = true;
        base = rest;
    }

    geometry_type_from_keyword(base).map(|geometry_type| (geometry_type, dimensions))
}

fn parse_suffix(word: &str) -> Option<Dimensions> {
    ["Z", "M", "ZM"]
        .into_iter()
        .find(|suffix| word.eq_ignore_ascii_case(suffix))
        .map(|suffix| Dimensions {
            has_z: suffix.contains('Z'),
            has_m: suffix.contains('M'),
        })
}

fn strip_suffix_ignore_case<'a>(word: &'a str, suffix: &str) -> Option<&'a str> {
    let split = word.len().checked_sub(suffix.len())?;
    match word.get(split..) {
        Some(tail) if tail.eq_ignore_ascii_case(suffix) => word.get(..split),
        _ => None,
    }
}

fn empty_geometry(geometry_type: GeometryType) -> Result<Geometry, CodecError> {
    Ok(match geometry_type {
        GeometryType::Point => return Err(CodecError::EmptyGeometry),
        GeometryType::LineString => LineString::new(vec![]).into(),
        GeometryType::Polygon => Polygon::from_rings(vec![]).into(),
        GeometryType::MultiPoint => MultiPoint::from(Vec::<Coordinate>::new()).into(),
        GeometryType::MultiLineString => MultiLineString::from(Vec::<LineString>::new()).into(),
        GeometryType::MultiPolygon => MultiPolygon::from(Vec::<Polygon>::new()).into(),
        GeometryType::GeometryCollection => GeometryCollection::from(Vec::<Geometry>::new()).into(),
    })
}
