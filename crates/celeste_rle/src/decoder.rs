use crate::{
    ByteReader, Corruption, Header, Pixel, PixelBuffer, Result, RleError, RleImage, Rgb, Rgba,
    MAX_RUN,
};

/// Smallest possible run on the wire: a count byte and a zero alpha byte.
const MIN_RUN_LEN: usize = 2;

/// Decodes a complete `.data` container.
///
/// # Format
///
/// ```text
/// i32 LE width | i32 LE height | u8 has_alpha | run...
/// ```
///
/// Each run is a count byte followed by its color:
/// - no alpha: `B G R`
/// - alpha: `A`, then `B G R` only if `A != 0`
///
/// A run with `A == 0` always decodes to fully transparent black, whatever
/// color the pixels had before encoding.
///
/// # Returns
///
/// The image with exactly `width * height` pixels, as [`Rgb`] or [`Rgba`]
/// depending on the header flag. Bytes after the last needed run are ignored.
///
/// # Example
///
/// ```rust
/// use celeste_rle::{rle_decode, PixelBuffer, Rgb};
///
/// // 1x1, no alpha, one run: count=1, B=0x1E, G=0x14, R=0x0A
/// let data = [1, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0x1e, 0x14, 0x0a];
/// let image = rle_decode(&data)?;
///
/// assert_eq!(image.pixels, PixelBuffer::Rgb(vec![Rgb::new(0x0a, 0x14, 0x1e)]));
/// # Ok::<(), celeste_rle::RleError>(())
/// ```
///
/// # Errors
///
/// - [`RleError::TruncatedHeader`] if the data is shorter than the header
/// - [`RleError::InvalidDimensions`] if width or height is not positive
/// - [`RleError::TruncatedRun`] if the data ends inside a run or before enough
///   pixels were produced
/// - [`RleError::CorruptRle`] on a zero count, or a run that would exceed
///   `width * height`
#[must_use = "this returns the decoded RleImage"]
pub fn rle_decode(data: &[u8]) -> Result<RleImage> {
    let mut reader = ByteReader::new(data);
    let header = Header::read(&mut reader)?;
    let (width, height) = header.dimensions()?;
    let total = header.pixel_count()?;

    let pixels = if header.has_alpha {
        PixelBuffer::Rgba(decode_runs::<Rgba>(&mut reader, total)?)
    } else {
        PixelBuffer::Rgb(decode_runs::<Rgb>(&mut reader, total)?)
    };

    Ok(RleImage {
        width,
        height,
        pixels,
    })
}

fn decode_runs<P: Pixel>(reader: &mut ByteReader<'_>, total: usize) -> Result<Vec<P>> {
    // Never reserve more than the remaining bytes could describe.
    let reachable = (reader.remaining() / MIN_RUN_LEN).saturating_mul(MAX_RUN);
    let mut pixels = Vec::with_capacity(total.min(reachable));

    while pixels.len() < total {
        let offset = reader.position();
        let count = reader
            .read_u8()
            .map_err(|_| RleError::TruncatedRun { offset })? as usize;
        if count == 0 {
            return Err(RleError::CorruptRle {
                offset,
                reason: Corruption::ZeroCount,
            });
        }

        let color = read_color::<P>(reader).map_err(|_| RleError::TruncatedRun { offset })?;

        let remaining = total - pixels.len();
        if count > remaining {
            return Err(RleError::CorruptRle {
                offset,
                reason: Corruption::Overrun { count, remaining },
            });
        }

        pixels.resize(pixels.len() + count, color);
    }

    Ok(pixels)
}

/// Reads one run's color payload, reordering wire `B G R` into `R G B`.
fn read_color<P: Pixel>(reader: &mut ByteReader<'_>) -> std::io::Result<P> {
    let alpha = if P::HAS_ALPHA {
        let alpha = reader.read_u8()?;
        if alpha == 0 {
            return Ok(P::from_rgba(0, 0, 0, 0));
        }
        alpha
    } else {
        0xff
    };

    let [b, g, r] = reader.read_array::<3>()?;
    Ok(P::from_rgba(r, g, b, alpha))
}
