//! Test corpus: roundtrips over patterns, sizes, and all three depths.

use zenbmp::*;

struct XorShift(u32);

impl XorShift {
    fn next(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }
}

fn noise_image(w: u32, h: u32, depth: BitDepth, seed: u32) -> Bitmap {
    let mut rng = XorShift(seed);
    let mut image = Bitmap::new(w, h, depth).unwrap();
    if depth.is_indexed() {
        for i in 0..=255u8 {
            let v = rng.next();
            image
                .set_palette_color(i, RGB8::new(v as u8, (v >> 8) as u8, (v >> 16) as u8))
                .unwrap();
        }
    }
    for y in 0..h {
        for x in 0..w {
            let v = rng.next();
            if depth.is_indexed() {
                image.set_pixel_index(x, y, v as u8).unwrap();
            } else {
                image
                    .set_pixel_color(x, y, RGB8::new(v as u8, (v >> 8) as u8, (v >> 16) as u8))
                    .unwrap();
            }
        }
    }
    image
}

fn assert_same_pixels(a: &Bitmap, b: &Bitmap) {
    assert_eq!((a.width(), a.height(), a.depth()), (b.width(), b.height(), b.depth()));
    assert_eq!(a.palette(), b.palette());
    for y in 0..a.height() {
        for x in 0..a.width() {
            assert_eq!(a.pixel_color(x, y).unwrap(), b.pixel_color(x, y).unwrap(), "({x}, {y})");
            if a.depth().is_indexed() {
                assert_eq!(a.pixel_index(x, y).unwrap(), b.pixel_index(x, y).unwrap());
            }
        }
    }
}

// ── Roundtrips ───────────────────────────────────────────────────────

#[test]
fn odd_widths_all_depths() {
    for depth in [BitDepth::Indexed8, BitDepth::Rgb24, BitDepth::Rgb32] {
        for w in 1..=9 {
            for h in [1, 2, 5] {
                let image = noise_image(w, h, depth, 0xDEAD_BEEF ^ (w * 31 + h));
                let decoded = decode(&encode(&image).unwrap()).unwrap();
                assert_same_pixels(&image, &decoded);
            }
        }
    }
}

#[test]
fn larger_indexed_roundtrip() {
    let image = noise_image(37, 23, BitDepth::Indexed8, 0xCAFE_BABE);
    let encoded = encode(&image).unwrap();
    assert_eq!(encoded.len(), 54 + 1024 + 40 * 23);
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn fourth_byte_of_32_bit_survives() {
    let mut image = noise_image(3, 2, BitDepth::Rgb32, 0xBADF00D);
    for (i, px) in image.pixels_mut().chunks_exact_mut(4).enumerate() {
        px[3] = i as u8 + 100;
    }
    let decoded = decode(&encode(&image).unwrap()).unwrap();
    assert_eq!(decoded.pixels(), image.pixels());
    assert_eq!(decoded.pixels()[3], 100);
}

#[test]
fn reencode_is_byte_identical() {
    for depth in [BitDepth::Indexed8, BitDepth::Rgb24, BitDepth::Rgb32] {
        let image = noise_image(6, 4, depth, 0x1234_5678);
        let first = encode(&image).unwrap();
        let second = encode(&decode(&first).unwrap()).unwrap();
        assert_eq!(first, second, "{depth}");
    }
}

// ── Raw buffer views ─────────────────────────────────────────────────

#[test]
fn raw_buffer_is_bottom_up_and_padded() {
    let mut image = Bitmap::new(3, 2, BitDepth::Indexed8).unwrap();
    assert_eq!(image.row_stride(), 4);
    assert_eq!(image.pixels().len(), 8);

    image.set_pixel_index(0, 0, 11).unwrap(); // top row
    image.set_pixel_index(2, 1, 22).unwrap(); // bottom row
    assert_eq!(image.pixels(), &[0, 0, 22, 0, 11, 0, 0, 0]);

    image.pixels_mut()[1] = 33;
    assert_eq!(image.pixel_index(1, 1).unwrap(), 33);
}

#[test]
fn raw_palette_view() {
    let mut image = Bitmap::new(1, 1, BitDepth::Indexed8).unwrap();
    let palette = image.palette_mut().unwrap();
    palette.as_bytes_mut()[8..12].copy_from_slice(&[3, 2, 1, 0]);
    assert_eq!(image.palette_color(2).unwrap(), RGB8::new(1, 2, 3));
    assert_eq!(image.palette().unwrap().as_bytes().len(), PALETTE_SIZE);

    let direct = Bitmap::new(1, 1, BitDepth::Rgb24).unwrap();
    assert!(direct.palette().is_none());
}

// ── Header fields ────────────────────────────────────────────────────

#[test]
fn decoded_header_fields() {
    let image = noise_image(5, 3, BitDepth::Rgb24, 7);
    let encoded = encode(&image).unwrap();
    let header = BmpHeader::read_from(&mut &encoded[..]).unwrap();
    assert_eq!(header.magic, *b"BM");
    assert_eq!(header.header_size, 40);
    assert_eq!(header.planes, 1);
    assert_eq!(header.bits_per_pixel, 24);
    assert_eq!(header.compression_type, 0);
    assert_eq!(header.width, 5);
    assert_eq!(header.height, 3);
    assert_eq!(header.image_data_size, 16 * 3);
    assert_eq!(header.file_size as usize, encoded.len());
}
