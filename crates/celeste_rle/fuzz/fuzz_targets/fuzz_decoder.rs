#![no_main]

use libfuzzer_sys::fuzz_target;
use celeste_rle::rle_decode;

fuzz_target!(|data: &[u8]| {
    // The decoder should never panic, regardless of input
    if let Ok(image) = rle_decode(data) {
        assert_eq!(image.pixels.len(), image.width * image.height);
    }
});
