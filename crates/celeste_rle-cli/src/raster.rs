//! PNG side of the conversion, backed by the `image` crate.

use crate::error::ConvertError;
use celeste_rle::{RleError, RleImage};
use image::{ColorType, ImageFormat, ImageReader};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Loads any raster the `image` crate can decode.
///
/// Images with an alpha channel become RGBA, everything else RGB. Other bit
/// depths and gray layouts are converted to 8-bit color.
pub fn read_raster(path: &Path) -> Result<RleImage, ConvertError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let has_alpha = img.color().has_alpha();

    let raw = if has_alpha {
        img.into_rgba8().into_raw()
    } else {
        img.into_rgb8().into_raw()
    };
    Ok(RleImage::from_raw(width, height, has_alpha, &raw)?)
}

/// Encodes `image` as PNG in memory.
pub fn encode_png(image: &RleImage) -> Result<Vec<u8>, ConvertError> {
    let invalid = || RleError::InvalidDimensions {
        width: image.width as i64,
        height: image.height as i64,
    };
    let width = u32::try_from(image.width).map_err(|_| invalid())?;
    let height = u32::try_from(image.height).map_err(|_| invalid())?;
    let color = if image.has_alpha() {
        ColorType::Rgba8
    } else {
        ColorType::Rgb8
    };

    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &image.to_raw(),
        width,
        height,
        color,
        ImageFormat::Png,
    )?;
    Ok(out.into_inner())
}

/// Writes `image` to `path` as PNG. The file is only created once encoding succeeded.
pub fn write_png(image: &RleImage, path: &Path) -> Result<(), ConvertError> {
    let png = encode_png(image)?;
    fs::write(path, png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use celeste_rle::{PixelBuffer, Rgba};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_png_roundtrip_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let image = RleImage::from_raw(2, 2, false, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])
            .unwrap();

        write_png(&image, &path).unwrap();
        assert_eq!(read_raster(&path).unwrap(), image);
    }

    #[test]
    fn test_png_roundtrip_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let pixels = vec![Rgba::new(255, 0, 0, 255), Rgba::new(0, 0, 0, 0), Rgba::new(1, 2, 3, 4)];
        let image = RleImage::new(3, 1, PixelBuffer::Rgba(pixels)).unwrap();

        write_png(&image, &path).unwrap();
        let loaded = read_raster(&path).unwrap();
        assert!(loaded.has_alpha());
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_png_signature() {
        let image = RleImage::from_raw(1, 1, true, &[0, 0, 0, 0]).unwrap();
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_read_non_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a.png");
        fs::write(&path, b"definitely not a png").unwrap();
        assert!(read_raster(&path).is_err());
    }
}
