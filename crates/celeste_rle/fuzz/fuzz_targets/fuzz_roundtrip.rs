#![no_main]

use libfuzzer_sys::fuzz_target;
use celeste_rle::{rle_decode, rle_encode, PixelBuffer, Rgba, RleImage};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    has_alpha: bool,
    pixels: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = (input.width as usize).max(1);
    let height = (input.height as usize).max(1);

    let channels = if input.has_alpha { 4 } else { 3 };
    let expected_size = width * height * channels;
    if input.pixels.len() < expected_size {
        return;
    }

    let image = match RleImage::from_raw(
        width,
        height,
        input.has_alpha,
        &input.pixels[..expected_size],
    ) {
        Ok(image) => image,
        Err(_) => return,
    };

    let data = rle_encode(&image).expect("valid image must encode");
    let decoded = rle_decode(&data).expect("encoder output must decode");

    // Transparent pixels lose their color; everything else is exact.
    let expected = match image.pixels {
        PixelBuffer::Rgba(pixels) => PixelBuffer::Rgba(
            pixels
                .into_iter()
                .map(|p| if p.a == 0 { Rgba::TRANSPARENT } else { p })
                .collect(),
        ),
        rgb => rgb,
    };
    assert_eq!(decoded.pixels, expected);
});
