//! Typed pixel storage shared by the decoder and encoder.
//!
//! The pixel layout is chosen once per image from the header's alpha flag;
//! afterwards every pixel is a fixed-size [`Rgb`] or [`Rgba`] record.

use crate::{Result, RleError};
use std::fmt::Debug;

/// 8-bit RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// 8-bit RGBA pixel with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Rgba {
    /// Fully transparent black, the only transparent color the container stores.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Common access to the two pixel layouts.
pub trait Pixel: Copy + Eq + Debug {
    /// Whether this layout carries an alpha channel.
    const HAS_ALPHA: bool;
    /// Bytes per pixel in an interleaved raw buffer.
    const CHANNELS: usize;

    /// Builds a pixel from components. Layouts without alpha drop `a`.
    fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self;

    /// Components as `[r, g, b, a]`. Layouts without alpha report `a = 255`.
    fn to_rgba(self) -> [u8; 4];

    /// Builds a pixel from one `CHANNELS`-sized chunk of a raw buffer.
    fn from_channels(chunk: &[u8]) -> Self;

    /// Appends this pixel's `CHANNELS` bytes to a raw buffer.
    fn push_channels(self, out: &mut Vec<u8>);
}

impl Pixel for Rgb {
    const HAS_ALPHA: bool = false;
    const CHANNELS: usize = 3;

    #[inline]
    fn from_rgba(r: u8, g: u8, b: u8, _a: u8) -> Self {
        Self::new(r, g, b)
    }

    #[inline]
    fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }

    #[inline]
    fn from_channels(chunk: &[u8]) -> Self {
        Self::new(chunk[0], chunk[1], chunk[2])
    }

    #[inline]
    fn push_channels(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.r, self.g, self.b]);
    }
}

impl Pixel for Rgba {
    const HAS_ALPHA: bool = true;
    const CHANNELS: usize = 4;

    #[inline]
    fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r, g, b, a)
    }

    #[inline]
    fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    fn from_channels(chunk: &[u8]) -> Self {
        Self::new(chunk[0], chunk[1], chunk[2], chunk[3])
    }

    #[inline]
    fn push_channels(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.r, self.g, self.b, self.a]);
    }
}

/// Row-major, top-left origin pixels in one of the two layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelBuffer {
    Rgb(Vec<Rgb>),
    Rgba(Vec<Rgba>),
}

impl PixelBuffer {
    #[inline]
    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelBuffer::Rgba(_))
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            PixelBuffer::Rgb(pixels) => pixels.len(),
            PixelBuffer::Rgba(pixels) => pixels.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per pixel when interleaved.
    #[inline]
    pub fn channels(&self) -> usize {
        match self {
            PixelBuffer::Rgb(_) => Rgb::CHANNELS,
            PixelBuffer::Rgba(_) => Rgba::CHANNELS,
        }
    }

    /// Splits interleaved `RGB` or `RGBA` bytes into pixels.
    ///
    /// The byte count must be a whole number of pixels.
    pub fn from_raw(has_alpha: bool, bytes: &[u8]) -> Result<Self> {
        if has_alpha {
            Ok(PixelBuffer::Rgba(split_channels(bytes)?))
        } else {
            Ok(PixelBuffer::Rgb(split_channels(bytes)?))
        }
    }

    /// Interleaves the pixels back into `RGB` or `RGBA` bytes.
    pub fn to_raw(&self) -> Vec<u8> {
        match self {
            PixelBuffer::Rgb(pixels) => join_channels(pixels),
            PixelBuffer::Rgba(pixels) => join_channels(pixels),
        }
    }
}

fn split_channels<P: Pixel>(bytes: &[u8]) -> Result<Vec<P>> {
    if bytes.len() % P::CHANNELS != 0 {
        return Err(RleError::BufferSizeMismatch {
            expected: bytes.len() - bytes.len() % P::CHANNELS,
            actual: bytes.len(),
        });
    }
    Ok(bytes.chunks_exact(P::CHANNELS).map(P::from_channels).collect())
}

fn join_channels<P: Pixel>(pixels: &[P]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() * P::CHANNELS);
    for &pixel in pixels {
        pixel.push_channels(&mut out);
    }
    out
}

/// A decoded `.data` image, or one about to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleImage {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Exactly `width * height` pixels
    pub pixels: PixelBuffer,
}

impl RleImage {
    /// Wraps `pixels`, checking that they cover `width * height` exactly.
    pub fn new(width: usize, height: usize, pixels: PixelBuffer) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(RleError::IntegerOverflow)?;
        if pixels.len() != expected {
            return Err(RleError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds an image from interleaved `RGB` (`has_alpha == false`) or
    /// `RGBA` bytes, as produced by most raster libraries.
    pub fn from_raw(width: usize, height: usize, has_alpha: bool, bytes: &[u8]) -> Result<Self> {
        let channels = if has_alpha {
            Rgba::CHANNELS
        } else {
            Rgb::CHANNELS
        };
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(RleError::IntegerOverflow)?;
        if bytes.len() != expected {
            return Err(RleError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Self::new(width, height, PixelBuffer::from_raw(has_alpha, bytes)?)
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.pixels.has_alpha()
    }

    /// Interleaved `RGB` or `RGBA` bytes in row-major order.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.to_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_rgb() {
        let image = RleImage::from_raw(2, 1, false, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert!(!image.has_alpha());
        assert_eq!(
            image.pixels,
            PixelBuffer::Rgb(vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)])
        );
        assert_eq!(image.to_raw(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_from_raw_rgba() {
        let image = RleImage::from_raw(1, 2, true, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert!(image.has_alpha());
        assert_eq!(image.pixels.channels(), 4);
        assert_eq!(
            image.pixels,
            PixelBuffer::Rgba(vec![Rgba::new(1, 2, 3, 4), Rgba::new(5, 6, 7, 8)])
        );
    }

    #[test]
    fn test_from_raw_size_mismatch() {
        let err = RleImage::from_raw(2, 2, false, &[0; 11]).unwrap_err();
        assert!(matches!(
            err,
            RleError::BufferSizeMismatch {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_new_checks_pixel_count() {
        let pixels = PixelBuffer::Rgb(vec![Rgb::default(); 5]);
        assert!(RleImage::new(2, 3, pixels.clone()).is_err());
        assert!(RleImage::new(5, 1, pixels).is_ok());
    }

    #[test]
    fn test_split_partial_pixel() {
        assert!(PixelBuffer::from_raw(true, &[0; 6]).is_err());
        assert_eq!(PixelBuffer::from_raw(true, &[0; 8]).unwrap().len(), 2);
    }

    #[test]
    fn test_rgb_reports_opaque() {
        assert_eq!(Rgb::new(1, 2, 3).to_rgba(), [1, 2, 3, 255]);
        assert_eq!(Rgb::from_rgba(1, 2, 3, 0), Rgb::new(1, 2, 3));
    }
}
