//! Bounds-checked reading and writing of the fixed width WKB fields.

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Byte order of the multi-byte WKB fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Most significant byte first (XDR). Marker byte `0`.
    BigEndian,
    /// Least significant byte first (NDR). Marker byte `1`.
    #[default]
    LittleEndian,
}

impl ByteOrder {
    /// Marker byte that starts every WKB geometry.
    pub fn marker(&self) -> u8 {
        match self {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        }
    }

    /// Byte order for the given marker byte.
    pub fn from_marker(marker: u8) -> Result<Self, CodecError> {
        match marker {
            0 => Ok(ByteOrder::BigEndian),
            1 => Ok(ByteOrder::LittleEndian),
            v => Err(CodecError::UnexpectedType(format!(
                "invalid byte order marker {v}"
            ))),
        }
    }
}

/// Reader over a byte slice that never reads past its end.
///
/// The byte order is given for every read, since nested WKB geometries declare their own order.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at the start of the buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes that are not read yet.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Returns true if every byte of the buffer was read.
    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?.get_u8())
    }

    /// Reads an unsigned 32-bit integer.
    pub fn read_u32(&mut self, order: ByteOrder) -> Result<u32, CodecError> {
        let mut chunk = self.take(4)?;
        Ok(match order {
            ByteOrder::BigEndian => chunk.get_u32(),
            ByteOrder::LittleEndian => chunk.get_u32_le(),
        })
    }

    /// Reads a signed 32-bit integer.
    pub fn read_i32(&mut self, order: ByteOrder) -> Result<i32, CodecError> {
        let mut chunk = self.take(4)?;
        Ok(match order {
            ByteOrder::BigEndian => chunk.get_i32(),
            ByteOrder::LittleEndian => chunk.get_i32_le(),
        })
    }

    /// Reads an IEEE-754 double.
    pub fn read_f64(&mut self, order: ByteOrder) -> Result<f64, CodecError> {
        let mut chunk = self.take(8)?;
        Ok(match order {
            ByteOrder::BigEndian => chunk.get_f64(),
            ByteOrder::LittleEndian => chunk.get_f64_le(),
        })
    }

    fn take(&mut self, width: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .position
            .checked_add(width)
            .filter(|end| *end <= self.buffer.len())
            .ok_or_else(|| {
                CodecError::DataCorrupted(format!(
                    "truncated buffer: {width} bytes expected at offset {}, but only {} left",
                    self.position,
                    self.remaining()
                ))
            })?;

        let chunk = &self.buffer[self.position..end];
        self.position = end;
        Ok(chunk)
    }
}

/// Growable output buffer writing multi-byte fields in a single byte order.
#[derive(Debug, Clone)]
pub struct ByteWriter {
    buffer: Vec<u8>,
    order: ByteOrder,
}

impl ByteWriter {
    /// Creates an empty writer.
    pub fn new(order: ByteOrder) -> Self {
        Self {
            buffer: Vec::new(),
            order,
        }
    }

    /// Byte order of the written fields.
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.put_u8(value);
    }

    /// Writes an unsigned 32-bit integer.
    pub fn write_u32(&mut self, value: u32) {
        match self.order {
            ByteOrder::BigEndian => self.buffer.put_u32(value),
            ByteOrder::LittleEndian => self.buffer.put_u32_le(value),
        }
    }

    /// Writes a signed 32-bit integer.
    pub fn write_i32(&mut self, value: i32) {
        match self.order {
            ByteOrder::BigEndian => self.buffer.put_i32(value),
            ByteOrder::LittleEndian => self.buffer.put_i32_le(value),
        }
    }

    /// Writes an IEEE-754 double.
    pub fn write_f64(&mut self, value: f64) {
        match self.order {
            ByteOrder::BigEndian => self.buffer.put_f64(value),
            ByteOrder::LittleEndian => self.buffer.put_f64_le(value),
        }
    }

    /// Consumes the writer and returns the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn reads_in_both_orders() {
        let bytes = [0x00, 0x00, 0x00, 0x01, 0x01, 0x00, 0x00, 0x00];
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_u32(ByteOrder::BigEndian).unwrap(), 1);
        assert_eq!(cursor.read_u32(ByteOrder::LittleEndian).unwrap(), 1);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn reads_double() {
        let bytes = 1.5f64.to_le_bytes();
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_f64(ByteOrder::LittleEndian).unwrap(), 1.5);

        let bytes = (-2.25f64).to_be_bytes();
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_f64(ByteOrder::BigEndian).unwrap(), -2.25);
    }

    #[test]
    fn truncated_read_fails_without_advancing() {
        let bytes = [0x01, 0x02, 0x03];
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_u8().unwrap(), 1);
        assert_matches!(
            cursor.read_u32(ByteOrder::LittleEndian),
            Err(CodecError::DataCorrupted(_))
        );
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.remaining(), 2);
        assert_matches!(
            cursor.read_f64(ByteOrder::LittleEndian),
            Err(CodecError::DataCorrupted(_))
        );
    }

    #[test]
    fn empty_buffer() {
        let mut cursor = ByteCursor::new(&[]);
        assert_matches!(cursor.read_u8(), Err(CodecError::DataCorrupted(_)));
    }

    #[test]
    fn byte_order_marker() {
        assert_eq!(ByteOrder::from_marker(0).unwrap(), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::from_marker(1).unwrap(), ByteOrder::LittleEndian);
        assert_matches!(
            ByteOrder::from_marker(2),
            Err(CodecError::UnexpectedType(_))
        );
    }

    #[test]
    fn writer_matches_reader() {
        for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
            let mut writer = ByteWriter::new(order);
            writer.write_u8(order.marker());
            writer.write_u32(0xDEAD_BEEF);
            writer.write_i32(-4326);
            writer.write_f64(std::f64::consts::PI);
            let bytes = writer.into_inner();
            assert_eq!(bytes.len(), 17);

            let mut cursor = ByteCursor::new(&bytes);
            assert_eq!(cursor.read_u8().unwrap(), order.marker());
            assert_eq!(cursor.read_u32(order).unwrap(), 0xDEAD_BEEF);
            assert_eq!(cursor.read_i32(order).unwrap(), -4326);
            assert_eq!(cursor.read_f64(order).unwrap(), std::f64::consts::PI);
            assert!(cursor.is_at_end());
        }
    }
}
