#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = DecodeRequest::new(data).with_limits(&limits).decode() else {
        return;
    };

    let reencoded = encode(&decoded).expect("encoding into a Vec cannot fail");
    let Ok(decoded2) = decode(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    assert_eq!(decoded.depth(), decoded2.depth());
    assert_eq!(decoded.palette(), decoded2.palette());
    for y in 0..decoded.height() {
        for x in 0..decoded.width() {
            assert_eq!(
                decoded.pixel_color(x, y).ok(),
                decoded2.pixel_color(x, y).ok(),
                "roundtrip pixel mismatch at ({x}, {y})"
            );
        }
    }
});
