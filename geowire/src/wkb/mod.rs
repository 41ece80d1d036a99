//! Well-known binary (WKB) codec.
//!
//! Both ISO WKB and the extended layout with an embedded SRID are read. The extended layout is written:
//!
//! ```text
//! [1 byte]  byte order marker (0 = big endian, 1 = little endian)
//! [4 bytes] type word: base type in bits 0-27, SRID flag in bit 29, M flag in bit 30, Z flag in bit 31
//! [4 bytes] SRID, only if the SRID flag is set
//! ...       type specific body
//! ```

mod decode;
mod encode;

pub use decode::decode;
pub use encode::encode;

/// Size of the smallest possible WKB geometry: a 2d point.
const MIN_POINT_SIZE: usize = 1 + 4 + 2 * 8;
/// Size of the smallest possible WKB geometry with a count: an empty line string.
const MIN_LIST_GEOMETRY_SIZE: usize = 1 + 4 + 4;
