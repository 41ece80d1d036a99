//! Codecs for the OGC well-known binary (WKB) and well-known text (WKT) geometry formats.
//!
//! Decoding resolves the reference of the input coordinates (explicitly supplied or embedded in the data as
//! an SRID), walks the format and converts every coordinate into the requested target reference. Encoding
//! walks the geometry once and optionally converts coordinates into a target reference, writing its SRID.
//!
//! ```
//! use geowire::{decode_wkt, encode_wkb_hex, ByteOrder, Reference};
//!
//! let geometry = decode_wkt("SRID=4326;POINT(1 2)", None, Reference::Geographic).unwrap();
//! let hex = encode_wkb_hex(&geometry, ByteOrder::LittleEndian, None).unwrap();
//! assert_eq!(hex, "0101000000000000000000F03F0000000000000040");
//! ```
//!
//! All calls are synchronous and keep their state on the stack, so they can run concurrently from any
//! number of threads.

pub use cursor::ByteOrder;
pub use error::CodecError;
pub use geowire_types::{
    Coordinate, Geometry, GeometryCollection, GeometryType, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Polygon, Reference, Ring,
};
pub use options::{DecodeOptions, EncodeOptions, SourceReference};

mod cursor;
pub mod error;
mod options;
mod scanner;
pub mod type_code;
pub mod wkb;
pub mod wkt;

/// Decodes a WKB buffer.
///
/// If `source` is `None`, the SRID embedded in the buffer is used. Coordinates are converted into `target`.
pub fn decode_wkb(
    bytes: &[u8],
    source: Option<SourceReference>,
    target: Reference,
) -> Result<Geometry, CodecError> {
    wkb::decode(bytes, &decode_options(source, target))
}

/// Decodes a WKB buffer with full control over the decoder.
pub fn decode_wkb_with(bytes: &[u8], options: &DecodeOptions) -> Result<Geometry, CodecError> {
    wkb::decode(bytes, options)
}

/// Decodes a WKB buffer given as a hex string (upper or lower case), as produced by most databases.
pub fn decode_wkb_hex(
    hex: &str,
    source: Option<SourceReference>,
    target: Reference,
) -> Result<Geometry, CodecError> {
    let bytes = hex::decode(hex.trim())?;
    decode_wkb(&bytes, source, target)
}

/// Encodes a geometry as WKB.
///
/// If `target` is set, coordinates are converted into it and its SRID is written with the top level
/// geometry. No SRID is written for [`Reference::Unspecified`].
pub fn encode_wkb(
    geometry: &Geometry,
    byte_order: ByteOrder,
    target: Option<Reference>,
) -> Result<Vec<u8>, CodecError> {
    wkb::encode(
        geometry,
        &EncodeOptions {
            byte_order,
            target,
        },
    )
}

/// Encodes a geometry as WKB with full control over the encoder.
pub fn encode_wkb_with(
    geometry: &Geometry,
    options: &EncodeOptions,
) -> Result<Vec<u8>, CodecError> {
    wkb::encode(geometry, options)
}

/// Encodes a geometry as an upper case hex string of its WKB.
pub fn encode_wkb_hex(
    geometry: &Geometry,
    byte_order: ByteOrder,
    target: Option<Reference>,
) -> Result<String, CodecError> {
    encode_wkb(geometry, byte_order, target).map(hex::encode_upper)
}

/// Decodes a WKT string.
///
/// If `source` is `None`, the `SRID=` prefix of the text is used. Coordinates are converted into `target`.
pub fn decode_wkt(
    text: &str,
    source: Option<SourceReference>,
    target: Reference,
) -> Result<Geometry, CodecError> {
    wkt::decode(text, &decode_options(source, target))
}

/// Decodes a WKT string with full control over the decoder.
pub fn decode_wkt_with(text: &str, options: &DecodeOptions) -> Result<Geometry, CodecError> {
    wkt::decode(text, options)
}

/// Encodes a geometry as WKT.
///
/// If `target` is set, coordinates are converted into it and the text is prefixed with `SRID=<srid>;`.
/// No prefix is written for [`Reference::Unspecified`].
pub fn encode_wkt(geometry: &Geometry, target: Option<Reference>) -> Result<String, CodecError> {
    wkt::encode(
        geometry,
        &EncodeOptions {
            target,
            ..Default::default()
        },
    )
}

/// Encodes a geometry as WKT with full control over the encoder.
pub fn encode_wkt_with(geometry: &Geometry, options: &EncodeOptions) -> Result<String, CodecError> {
    wkt::encode(geometry, options)
}

fn decode_options(source: Option<SourceReference>, target: Reference) -> DecodeOptions {
    DecodeOptions {
        source,
        target,
        ..Default::default()
    }
}
