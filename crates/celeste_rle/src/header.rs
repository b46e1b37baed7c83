//! The fixed 9-byte header at the start of every `.data` file.

use crate::{ByteReader, ByteWriter, Result, RleError};

/// Size of the encoded header: width, height and the alpha flag.
pub const HEADER_LEN: usize = 4 + 4 + 1;

/// Image dimensions and pixel layout as stored in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: i32,
    pub height: i32,
    /// Whether runs carry an alpha byte
    pub has_alpha: bool,
}

impl Header {
    /// Reads the header from the start of `data` without touching the runs.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read(&mut ByteReader::new(data))
    }

    /// Consumes [`HEADER_LEN`] bytes from `reader`.
    ///
    /// Any nonzero flag byte means alpha is present.
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let available = reader.remaining();
        if available < HEADER_LEN {
            return Err(RleError::TruncatedHeader { available });
        }
        let truncated = |_: std::io::Error| RleError::TruncatedHeader { available };

        let width = reader.read_i32().map_err(truncated)?;
        let height = reader.read_i32().map_err(truncated)?;
        let has_alpha = reader.read_u8().map_err(truncated)? != 0;

        Ok(Self {
            width,
            height,
            has_alpha,
        })
    }

    /// Appends the [`HEADER_LEN`] header bytes to `writer`.
    pub fn write(&self, writer: &mut ByteWriter) {
        writer.write_i32(self.width);
        writer.write_i32(self.height);
        writer.write_u8(self.has_alpha as u8);
    }

    /// Returns `(width, height)` once both are known to be positive.
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        if self.width <= 0 || self.height <= 0 {
            return Err(RleError::InvalidDimensions {
                width: self.width.into(),
                height: self.height.into(),
            });
        }
        Ok((self.width as usize, self.height as usize))
    }

    /// Total number of pixels the run stream must describe.
    pub fn pixel_count(&self) -> Result<usize> {
        let (width, height) = self.dimensions()?;
        width.checked_mul(height).ok_or(RleError::IntegerOverflow)
    }
}
