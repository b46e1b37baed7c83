//! Sequential byte access over in-memory buffers.
//!
//! The container is always read and written front to back, so the reader
//! only moves forward and the writer only appends.

use byteorder::{ReadBytesExt, LE};
use std::io::{self, Cursor, Read};

/// Forward-only reader over a byte slice that tracks its position.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Byte offset of the next read.
    #[inline]
    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.inner.get_ref().len().saturating_sub(self.position())
    }

    #[inline]
    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.inner.read_u8()
    }

    /// Reads a little-endian `i32`.
    #[inline]
    pub fn read_i32(&mut self) -> io::Result<i32> {
        self.inner.read_i32::<LE>()
    }

    /// Reads exactly `N` bytes.
    ///
    /// On failure the position is left where it was, so callers can still
    /// report the offset of the incomplete field.
    pub fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        if self.remaining() < N {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}

/// Append-only writer producing an owned byte buffer.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Writes a little-endian `i32`.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_tracks_position() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0xff];
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.read_i32().unwrap(), 0x0403_0201);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.read_u8().unwrap(), 0x05);
        assert_eq!(reader.read_u8().unwrap(), 0xff);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.read_u8().is_err());
    }

    #[test]
    fn test_reader_negative_i32() {
        let data = (-2i32).to_le_bytes();
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_i32().unwrap(), -2);
    }

    #[test]
    fn test_short_array_read_keeps_position() {
        let data = [1, 2];
        let mut reader = ByteReader::new(&data);
        assert!(reader.read_array::<3>().is_err());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_array::<2>().unwrap(), [1, 2]);
    }

    #[test]
    fn test_writer_appends_little_endian() {
        let mut writer = ByteWriter::with_capacity(8);
        writer.write_i32(0x0102_0304);
        writer.write_u8(7);
        writer.write_bytes(&[8, 9]);
        assert_eq!(writer.position(), 7);
        assert_eq!(writer.into_inner(), vec![4, 3, 2, 1, 7, 8, 9]);
    }
}
