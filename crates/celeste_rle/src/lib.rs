//! # celeste_rle
//!
//! Encoder and decoder for the run-length encoded `.data` sprite container
//! used by Celeste's texture atlases.
//!
//! ## Container layout
//!
//! ```text
//! i32 LE width | i32 LE height | u8 has_alpha | runs...
//! ```
//!
//! Each run is a count byte (1-255) followed by a color payload:
//!
//! - without alpha: `B G R`
//! - with alpha: `A` alone when `A == 0`, otherwise `A B G R`
//!
//! Runs continue until `width * height` pixels are accounted for. Anything
//! after the last run is ignored.
//!
//! ## Quick Start
//!
//! ```rust
//! use celeste_rle::{rle_decode, rle_encode, RleImage};
//!
//! // 2x1 RGB image: red, red
//! let image = RleImage::from_raw(2, 1, false, &[255, 0, 0, 255, 0, 0])?;
//! let data = rle_encode(&image)?;
//! assert_eq!(&data[9..], &[2, 0, 0, 255]);
//!
//! let decoded = rle_decode(&data)?;
//! assert_eq!(decoded, image);
//! # Ok::<(), celeste_rle::RleError>(())
//! ```

use thiserror::Error;

pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod header;
pub mod pixel;

pub use cursor::{ByteReader, ByteWriter};
pub use decoder::rle_decode;
pub use encoder::rle_encode;
pub use header::{Header, HEADER_LEN};
pub use pixel::{Pixel, PixelBuffer, Rgb, Rgba, RleImage};

/// Longest run a single count byte can describe.
pub const MAX_RUN: usize = 255;

/// Errors that can occur while encoding or decoding a `.data` container.
#[derive(Debug, Error)]
pub enum RleError {
    /// Fewer than [`HEADER_LEN`] bytes were available
    #[error("truncated header: need {HEADER_LEN} bytes, got {available}")]
    TruncatedHeader { available: usize },

    /// The run starting at `offset` ended before its color payload was complete
    #[error("truncated run at byte {offset}")]
    TruncatedRun { offset: usize },

    /// The run starting at `offset` is invalid
    #[error("corrupt RLE stream at byte {offset}: {reason}")]
    CorruptRle { offset: usize, reason: Corruption },

    /// Width or height is not representable in the container
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Integer overflow while sizing the pixel buffer
    #[error("integer overflow")]
    IntegerOverflow,
}

/// Why a run was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Corruption {
    #[error("run count is zero")]
    ZeroCount,

    #[error("run of {count} pixels exceeds the {remaining} pixels left in the image")]
    Overrun { count: usize, remaining: usize },
}

/// Result type for `.data` operations.
pub type Result<T> = core::result::Result<T, RleError>;
