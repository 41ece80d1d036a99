//! Geometry type codes and dimension flags shared by the binary and text formats.

use geowire_types::{Coordinate, GeometryType};

use crate::error::CodecError;

/// Type word bit: coordinates have `z`.
pub const Z_FLAG: u32 = 0x8000_0000;
/// Type word bit: coordinates have `m`.
pub const M_FLAG: u32 = 0x4000_0000;
/// Type word bit: an SRID follows the type word.
pub const SRID_FLAG: u32 = 0x2000_0000;
/// Bits of the type word holding the base type code.
pub const BASE_TYPE_MASK: u32 = 0x0FFF_FFFF;
/// Base type code of a triangle. Triangles are decoded as polygons.
pub const TRIANGLE_CODE: u32 = 17;

/// Optional ordinates carried by every coordinate of a geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Coordinates have altitude.
    pub has_z: bool,
    /// Coordinates have linear reference.
    pub has_m: bool,
}

impl Dimensions {
    /// Only `x` and `y`.
    pub const XY: Self = Self {
        has_z: false,
        has_m: false,
    };

    /// Dimensions of the representative coordinate. A geometry without coordinates is 2d.
    pub fn of(coordinate: Option<&Coordinate>) -> Self {
        coordinate
            .map(|c| Self {
                has_z: c.has_z(),
                has_m: c.has_m(),
            })
            .unwrap_or_default()
    }

    /// Number of ordinates of every coordinate.
    pub fn ordinates(&self) -> usize {
        2 + usize::from(self.has_z) + usize::from(self.has_m)
    }

    /// Suffix of a WKT keyword: `""`, `"Z"`, `"M"` or `"ZM"`.
    pub fn wkt_suffix(&self) -> &'static str {
        match (self.has_z, self.has_m) {
            (false, false) => "",
            (true, false) => "Z",
            (false, true) => "M",
            (true, true) => "ZM",
        }
    }
}

/// Decoded WKB type word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeWord {
    /// Geometry the body describes.
    pub geometry_type: GeometryType,
    /// Optional ordinates of the coordinates in the body.
    pub dimensions: Dimensions,
    /// Whether an SRID follows the type word.
    pub has_srid: bool,
}

impl TypeWord {
    /// Parses a type word.
    ///
    /// Both the extended layout (high bits for `z`, `m` and SRID) and the ISO layout (1000, 2000 or 3000
    /// added to the base code) are accepted.
    pub fn parse(word: u32) -> Result<Self, CodecError> {
        let mut dimensions = Dimensions {
            has_z: word & Z_FLAG != 0,
            has_m: word & M_FLAG != 0,
        };
        let has_srid = word & SRID_FLAG != 0;

        let base = word & BASE_TYPE_MASK;
        let (iso_dimensions, code) = (base / 1000, base % 1000);
        match iso_dimensions {
            0 => {}
            1 => dimensions.has_z = true,
            2 => dimensions.has_m = true,
            3 => {
                dimensions.has_z = true;
                dimensions.has_m = true;
            }
            _ => {
                return Err(CodecError::UnexpectedType(format!(
                    "WKB type code {word:#010x}"
                )))
            }
        }

        let geometry_type = geometry_type_from_code(code).ok_or_else(|| {
            CodecError::UnexpectedType(format!("WKB type code {word:#010x}"))
        })?;

        Ok(Self {
            geometry_type,
            dimensions,
            has_srid,
        })
    }

    /// Builds the type word in the extended layout.
    pub fn to_word(&self) -> u32 {
        let mut word = self.geometry_type.code();
        if self.dimensions.has_z {
            word |= Z_FLAG;
        }
        if self.dimensions.has_m {
            word |= M_FLAG;
        }
        if self.has_srid {
            word |= SRID_FLAG;
        }

        word
    }
}

/// Geometry type for a base WKB type code.
pub fn geometry_type_from_code(code: u32) -> Option<GeometryType> {
    match code {
        TRIANGLE_CODE => Some(GeometryType::Polygon),
        code => GeometryType::ALL.into_iter().find(|t| t.code() == code),
    }
}

/// Geometry type for a WKT keyword without dimension suffix, ignoring case.
///
/// `LINEARRING` is read as a line string and `TRIANGLE` as a polygon.
pub fn geometry_type_from_keyword(keyword: &str) -> Option<GeometryType> {
    if keyword.eq_ignore_ascii_case("LINEARRING") {
        return Some(GeometryType::LineString);
    }
    if keyword.eq_ignore_ascii_case("TRIANGLE") {
        return Some(GeometryType::Polygon);
    }

    GeometryType::ALL
        .into_iter()
        .find(|t| t.name().eq_ignore_ascii_case(keyword))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_extended_flags() {
        let word = TypeWord::parse(0xA000_0001).unwrap();
        assert_eq!(word.geometry_type, GeometryType::Point);
        assert!(word.dimensions.has_z);
        assert!(!word.dimensions.has_m);
        assert!(word.has_srid);
        assert_eq!(word.to_word(), 0xA000_0001);

        let word = TypeWord::parse(0x4000_0006).unwrap();
        assert_eq!(word.geometry_type, GeometryType::MultiPolygon);
        assert_eq!(
            word.dimensions,
            Dimensions {
                has_z: false,
                has_m: true
            }
        );
    }

    #[test]
    fn parses_iso_codes() {
        let word = TypeWord::parse(1002).unwrap();
        assert_eq!(word.geometry_type, GeometryType::LineString);
        assert_eq!(word.dimensions.wkt_suffix(), "Z");

        let word = TypeWord::parse(3007).unwrap();
        assert_eq!(word.geometry_type, GeometryType::GeometryCollection);
        assert_eq!(word.dimensions.wkt_suffix(), "ZM");

        assert_eq!(TypeWord::parse(2001).unwrap().dimensions.wkt_suffix(), "M");
    }

    #[test]
    fn triangle_is_polygon() {
        assert_eq!(
            TypeWord::parse(TRIANGLE_CODE).unwrap().geometry_type,
            GeometryType::Polygon
        );
        assert_eq!(
            TypeWord::parse(1017).unwrap().geometry_type,
            GeometryType::Polygon
        );
    }

    #[test]
    fn unknown_codes() {
        for word in [0, 8, 16, 18, 4001, 0x1000_0000] {
            assert_matches!(
                TypeWord::parse(word),
                Err(CodecError::UnexpectedType(_)),
                "word {word:#x}"
            );
        }
    }

    #[test]
    fn keywords() {
        assert_eq!(
            geometry_type_from_keyword("multipolygon"),
            Some(GeometryType::MultiPolygon)
        );
        assert_eq!(
            geometry_type_from_keyword("LinearRing"),
            Some(GeometryType::LineString)
        );
        assert_eq!(
            geometry_type_from_keyword("TRIANGLE"),
            Some(GeometryType::Polygon)
        );
        assert_eq!(geometry_type_from_keyword("CIRCULARSTRING"), None);
    }

    #[test]
    fn dimension_ordinates() {
        assert_eq!(Dimensions::XY.ordinates(), 2);
        assert_eq!(
            Dimensions {
                has_z: true,
                has_m: true
            }
            .ordinates(),
            4
        );
    }
}
