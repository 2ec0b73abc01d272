//! Bounds-checked little-endian reader over an immutable byte buffer.
//!
//! Every other decoder component reads through [`ByteCursor`]. The format
//! has no length-prefixed framing for most records, so parsers advance the
//! cursor field by field and scan for sentinels with the non-advancing
//! [`peek_f32_at`](ByteCursor::peek_f32_at). There are no write
//! operations: the buffer stays read-only for the decode's entire
//! lifetime.

use byteorder::{ByteOrder, LittleEndian};

use super::error::{PltError, Result};

/// Sequential little-endian reader with explicit bounds checks.
///
/// Wraps a borrowed byte buffer and a current offset. Any read whose span
/// exceeds the buffer length fails with [`PltError::OutOfBounds`] carrying
/// the offending offset; callers treat that as fatal for the whole parse.
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at `pos`.
    pub fn new(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    /// Current absolute byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total buffer length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Borrow `count` bytes starting at `offset` without moving the cursor.
    pub fn slice(&self, offset: usize, count: usize) -> Result<&'a [u8]> {
        if offset.checked_add(count).map_or(true, |end| end > self.buf.len()) {
            return Err(PltError::OutOfBounds {
                offset,
                needed: count,
                len: self.buf.len(),
            });
        }
        Ok(&self.buf[offset..offset + count])
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.slice(self.pos, count)?;
        self.pos += count;
        Ok(bytes)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Read a float32 at an arbitrary offset without advancing.
    ///
    /// This is the primitive behind sentinel scanning: the header and data
    /// sections are delimited by float32 markers that can only be found by
    /// stepping through the stream four bytes at a time.
    pub fn peek_f32_at(&self, offset: usize) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.slice(offset, 4)?))
    }

    /// Read `count` consecutive little-endian float32 values.
    ///
    /// Used for variable payloads and connectivity, where the element
    /// count is known from the zone header before the read starts.
    pub fn read_f32_array(&mut self, count: usize) -> Result<Vec<f32>> {
        // Counts originate from i32 header fields; an overflowing product
        // still fails the bounds check inside `take`.
        let byte_len = count.checked_mul(4).unwrap_or(usize::MAX);
        let bytes = self.take(byte_len)?;
        let mut values = vec![0f32; count];
        LittleEndian::read_f32_into(bytes, &mut values);
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fixed_width_values_in_order() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&7i16.to_le_bytes());
        buf.extend_from_slice(&(-3i32).to_le_bytes());
        buf.extend_from_slice(&1.5f32.to_le_bytes());
        buf.extend_from_slice(&2.25f64.to_le_bytes());

        let mut cursor = ByteCursor::new(&buf, 0);
        assert_eq!(cursor.read_i16().unwrap(), 7);
        assert_eq!(cursor.read_i32().unwrap(), -3);
        assert_eq!(cursor.read_f32().unwrap(), 1.5);
        assert_eq!(cursor.read_f64().unwrap(), 2.25);
        assert_eq!(cursor.position(), buf.len());
    }

    #[test]
    fn read_past_end_is_out_of_bounds() {
        let buf = [0u8; 3];
        let mut cursor = ByteCursor::new(&buf, 0);
        let err = cursor.read_i32().unwrap_err();
        match err {
            PltError::OutOfBounds { offset, needed, len } => {
                assert_eq!(offset, 0);
                assert_eq!(needed, 4);
                assert_eq!(len, 3);
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn peek_does_not_advance() {
        let buf = 299.0f32.to_le_bytes();
        let cursor = ByteCursor::new(&buf, 0);
        assert_eq!(cursor.peek_f32_at(0).unwrap(), 299.0);
        assert_eq!(cursor.position(), 0);
        assert!(cursor.peek_f32_at(1).is_err());
    }

    #[test]
    fn read_f32_array_decodes_every_element() {
        let mut buf = Vec::new();
        for v in [1.0f32, -2.0, 0.5] {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        let mut cursor = ByteCursor::new(&buf, 0);
        assert_eq!(cursor.read_f32_array(3).unwrap(), vec![1.0, -2.0, 0.5]);
        assert!(cursor.read_f32_array(1).is_err());
    }
}
