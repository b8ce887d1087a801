#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: u32, height: u32, bpp: u16, data_size: u32) -> Vec<u8> {
    let palette = if bpp == 8 { 1024 } else { 0 };
    let offset = 54 + palette;
    let mut h = vec![0u8; 54];
    h[0] = b'B'; h[1] = b'M';
    h[2..6].copy_from_slice(&(offset + data_size).to_le_bytes()); // file size
    h[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    h[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    h[18..22].copy_from_slice(&width.to_le_bytes());
    h[22..26].copy_from_slice(&height.to_le_bytes());
    h[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    h[28..30].copy_from_slice(&bpp.to_le_bytes());
    h[34..38].copy_from_slice(&data_size.to_le_bytes());
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 1x1: 3 data bytes + 1 padding
    let mut bmp = header(1, 1, 24, 4);
    bmp.extend_from_slice(&[0xff, 0x00, 0x00, 0x00]);
    fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp).unwrap();

    // 32-bit 2x1
    let mut bmp = header(2, 1, 32, 8);
    bmp.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
    fs::write(format!("{dir}/bmp32_2x1.bmp"), bmp).unwrap();

    // 8-bit 3x2 with a grey ramp palette
    let mut bmp = header(3, 2, 8, 8);
    for i in 0..=255u8 {
        bmp.extend_from_slice(&[i, i, i, 0]);
    }
    bmp.extend_from_slice(&[0, 1, 2, 0, 3, 4, 5, 0]);
    fs::write(format!("{dir}/bmp8_3x2.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/header_only.bin"), header(4, 4, 24, 48)).unwrap();
    fs::write(format!("{dir}/bpp16.bin"), header(1, 1, 16, 4)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
