//! Run-length encoder producing `.data` containers.

use crate::{
    ByteWriter, Header, Pixel, PixelBuffer, Result, RleError, RleImage, HEADER_LEN, MAX_RUN,
};

/// Encode an image into a `.data` container.
///
/// Consecutive pixels that are equal in every channel (alpha included) are
/// collapsed into runs of at most [`MAX_RUN`] pixels; longer stretches are
/// split into several maximal runs.
///
/// With alpha, a fully transparent pixel is written as a bare `0x00` alpha
/// byte and its RGB is dropped, so it decodes as `(0, 0, 0, 0)`. Pixels
/// without alpha are always written with their full color.
///
/// # Example
/// ```rust
/// use celeste_rle::{rle_encode, RleImage};
///
/// // 3x1 RGBA: two transparent pixels with different RGB, then opaque white
/// let raw = [9, 9, 9, 0, 1, 2, 3, 0, 255, 255, 255, 255];
/// let image = RleImage::from_raw(3, 1, true, &raw)?;
/// let data = rle_encode(&image)?;
///
/// // Different RGB with alpha 0 still breaks the run.
/// assert_eq!(&data[9..], &[1, 0, 1, 0, 1, 255, 255, 255, 255]);
/// # Ok::<(), celeste_rle::RleError>(())
/// ```
///
/// # Errors
///
/// - [`RleError::InvalidDimensions`] if width or height is zero or does not fit
///   in the header's `i32`
/// - [`RleError::BufferSizeMismatch`] if the pixel count is not `width * height`
#[must_use = "this returns the encoded container bytes"]
pub fn rle_encode(image: &RleImage) -> Result<Vec<u8>> {
    let header = header_for(image)?;
    let expected = header.pixel_count()?;
    if image.pixels.len() != expected {
        return Err(RleError::BufferSizeMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut writer = ByteWriter::with_capacity(HEADER_LEN + expected.min(1 << 16));
    header.write(&mut writer);

    match &image.pixels {
        PixelBuffer::Rgb(pixels) => encode_runs(pixels, &mut writer),
        PixelBuffer::Rgba(pixels) => encode_runs(pixels, &mut writer),
    }

    Ok(writer.into_inner())
}

fn header_for(image: &RleImage) -> Result<Header> {
    let invalid = || RleError::InvalidDimensions {
        width: i64::try_from(image.width).unwrap_or(i64::MAX),
        height: i64::try_from(image.height).unwrap_or(i64::MAX),
    };
    if image.width == 0 || image.height == 0 {
        return Err(invalid());
    }
    let width = i32::try_from(image.width).map_err(|_| invalid())?;
    let height = i32::try_from(image.height).map_err(|_| invalid())?;

    Ok(Header {
        width,
        height,
        has_alpha: image.has_alpha(),
    })
}

fn encode_runs<P: Pixel>(pixels: &[P], writer: &mut ByteWriter) {
    let mut i = 0;
    while i < pixels.len() {
        let pixel = pixels[i];
        let run = pixels[i..]
            .iter()
            .take(MAX_RUN)
            .take_while(|&&p| p == pixel)
            .count();

        writer.write_u8(run as u8);
        write_color(pixel, writer);
        i += run;
    }
}

/// Writes one run's color payload with `R G B` reordered to wire `B G R`.
fn write_color<P: Pixel>(pixel: P, writer: &mut ByteWriter) {
    let [r, g, b, a] = pixel.to_rgba();
    if P::HAS_ALPHA {
        writer.write_u8(a);
        if a == 0 {
            return;
        }
    }
    writer.write_bytes(&[b, g, r]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgb, Rgba};

    fn runs(data: &[u8]) -> &[u8] {
        &data[HEADER_LEN..]
    }

    #[test]
    fn test_encode_simple() {
        let image = RleImage::from_raw(1, 1, false, &[0x0a, 0x14, 0x1e]).unwrap();
        let data = rle_encode(&image).unwrap();
        assert_eq!(&data[..HEADER_LEN], &[1, 0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(runs(&data), &[1, 0x1e, 0x14, 0x0a]);
    }

    #[test]
    fn test_alpha_difference_breaks_run() {
        let pixels = vec![Rgba::new(5, 5, 5, 255), Rgba::new(5, 5, 5, 254)];
        let image = RleImage::new(2, 1, PixelBuffer::Rgba(pixels)).unwrap();
        let data = rle_encode(&image).unwrap();
        assert_eq!(runs(&data), &[1, 255, 5, 5, 5, 1, 254, 5, 5, 5]);
    }

    #[test]
    fn test_black_without_alpha_keeps_color() {
        let image = RleImage::new(2, 1, PixelBuffer::Rgb(vec![Rgb::default(); 2])).unwrap();
        let data = rle_encode(&image).unwrap();
        assert_eq!(runs(&data), &[2, 0, 0, 0]);
    }

    #[test]
    fn test_run_cap() {
        let pixels = PixelBuffer::Rgb(vec![Rgb::new(1, 2, 3); 600]);
        let image = RleImage::new(600, 1, pixels).unwrap();
        let data = rle_encode(&image).unwrap();
        assert_eq!(runs(&data), &[255, 3, 2, 1, 255, 3, 2, 1, 90, 3, 2, 1]);
    }

    #[test]
    fn test_invalid_dimensions() {
        let image = RleImage {
            width: 0,
            height: 4,
            pixels: PixelBuffer::Rgb(Vec::new()),
        };
        assert!(matches!(
            rle_encode(&image),
            Err(RleError::InvalidDimensions {
                width: 0,
                height: 4
            })
        ));

        let image = RleImage {
            width: i32::MAX as usize + 1,
            height: 1,
            pixels: PixelBuffer::Rgb(Vec::new()),
        };
        assert!(matches!(
            rle_encode(&image),
            Err(RleError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let image = RleImage {
            width: 2,
            height: 2,
            pixels: PixelBuffer::Rgba(vec![Rgba::TRANSPARENT; 3]),
        };
        assert!(matches!(
            rle_encode(&image),
            Err(RleError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }
}
