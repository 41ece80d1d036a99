//! Well-known text (WKT) codec.
//!
//! The reader accepts the OGC grammar with a few common extensions:
//!
//! * an `SRID=<int>;` prefix (extended WKT),
//! * dimension suffixes written either separately (`POINT Z (1 2 3)`) or joined (`POINTZ(1 2 3)`),
//! * coordinates with three or four numbers without any suffix,
//! * multipoint members with or without parentheses,
//! * `EMPTY` geometries, `LINEARRING` and `TRIANGLE` keywords.
//!
//! Keywords are case-insensitive. The writer produces compact upper case text, e.g. `POINT Z (1 2 3)` or
//! `MULTIPOINT(0 0,1 2)`.

mod decode;
mod encode;

pub use decode::decode;
pub use encode::encode;
