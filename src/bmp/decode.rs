//! BMP decoder: uncompressed 8, 24 and 32-bit `BITMAPINFOHEADER` files.

use std::io::{self, Read};

use super::{Bitmap, PALETTE_SIZE, Palette, alloc_zeroed, data_offset, utils};
use crate::error::BmpError;
use crate::header::{BmpHeader, INFO_HEADER_SIZE, MAGIC};
use crate::limits::Limits;
use crate::pixel::BitDepth;

/// Decode a complete image from `source`, which must be positioned at the
/// `"BM"` magic.
///
/// Any failure discards everything read so far.
pub(crate) fn decode_bmp<R: Read + ?Sized>(
    source: &mut R,
    limits: Option<&Limits>,
) -> Result<Bitmap, BmpError> {
    let mut header = BmpHeader::read_from(source)
        .map_err(|e| BmpError::InvalidFile(format!("cannot read header: {e}")))?;
    if header.magic != MAGIC {
        return Err(BmpError::InvalidFile(format!(
            "bad magic {:02X?}, expected \"BM\"",
            header.magic
        )));
    }
    let depth = validate(&header)?;
    let (width, height) = (header.width, header.height);
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidFile(format!(
            "zero dimension {width}x{height}"
        )));
    }
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    let stride = utils::padded_row_bytes(width, depth)
        .ok_or_else(|| BmpError::InvalidFile(format!("row of {width} pixels is too large")))?;
    let image_data_size = utils::image_data_size(width, height, depth).ok_or_else(|| {
        BmpError::InvalidFile(format!("{width}x{height} {depth} image is too large"))
    })?;
    if let Some(limits) = limits {
        limits.check_memory(image_data_size as usize)?;
    }
    log::debug!("decoding {width}x{height} {depth} BMP");

    let palette = if depth.is_indexed() {
        let mut bytes = Box::new([0u8; PALETTE_SIZE]);
        read_exact(source, &mut bytes[..], "palette")?;
        Some(Palette::from_bytes(bytes))
    } else {
        None
    };

    let expected_offset = data_offset(depth);
    if header.data_offset > expected_offset {
        let gap = u64::from(header.data_offset - expected_offset);
        log::debug!("skipping {gap} bytes before pixel data");
        let skipped = io::copy(&mut (&mut *source).take(gap), &mut io::sink())
            .map_err(BmpError::Io)?;
        if skipped < gap {
            return Err(BmpError::InvalidFile(
                "file ends before pixel data offset".into(),
            ));
        }
    }

    let mut data = alloc_zeroed(image_data_size as usize)?;
    let row_bytes = width as usize * depth.bytes_per_pixel();
    let pad = utils::padding_bytes(width, depth);
    // Buffer rows follow disk order: bottom row first.
    for (row, chunk) in data.chunks_exact_mut(stride).enumerate() {
        read_exact(source, &mut chunk[..row_bytes], "pixel data")?;
        let got = skip_padding(source, pad)?;
        if got < pad {
            log::trace!("row {row}: {got} of {pad} padding bytes present");
        }
    }

    let file_size = expected_offset
        .checked_add(image_data_size)
        .ok_or_else(|| BmpError::InvalidFile("file size overflows".into()))?;
    if header.image_data_size != image_data_size
        || header.data_offset != expected_offset
        || header.file_size != file_size
    {
        log::warn!(
            "normalizing header sizes: data {} -> {image_data_size}, offset {} -> {expected_offset}, file {} -> {file_size}",
            header.image_data_size,
            header.data_offset,
            header.file_size,
        );
    }
    header.image_data_size = image_data_size;
    header.data_offset = expected_offset;
    header.file_size = file_size;

    Ok(Bitmap::from_parts(header, depth, palette, data))
}

fn validate(header: &BmpHeader) -> Result<BitDepth, BmpError> {
    if header.header_size != INFO_HEADER_SIZE {
        return Err(BmpError::UnsupportedVariant(format!(
            "info header size {} (only {INFO_HEADER_SIZE} is supported)",
            header.header_size
        )));
    }
    if header.compression_type != 0 {
        return Err(BmpError::UnsupportedVariant(format!(
            "compression type {} (only uncompressed is supported)",
            header.compression_type
        )));
    }
    BitDepth::try_from(header.bits_per_pixel)
}

/// `read_exact` with short reads reported as an invalid file.
fn read_exact<R: Read + ?Sized>(
    source: &mut R,
    buf: &mut [u8],
    what: &str,
) -> Result<(), BmpError> {
    source.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => BmpError::InvalidFile(format!("truncated {what}")),
        _ => BmpError::Io(e),
    })
}

/// Consume up to `n` padding bytes. Returns how many were present; a short
/// count just means the file ended early.
fn skip_padding<R: Read + ?Sized>(source: &mut R, n: usize) -> Result<usize, BmpError> {
    let mut buf = [0u8; 3];
    let mut got = 0;
    while got < n {
        match source.read(&mut buf[got..n]) {
            Ok(0) => break,
            Ok(k) => got += k,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(BmpError::Io(e)),
        }
    }
    Ok(got)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rgb::RGB8;

    /// Hand-built 24-bit 2x2: bottom row blue, white; top row red, green.
    fn bmp_2x2() -> Vec<u8> {
        let mut out = Vec::new();
        let header = BmpHeader {
            magic: MAGIC,
            file_size: 70,
            reserved1: 0,
            reserved2: 0,
            data_offset: 54,
            header_size: 40,
            width: 2,
            height: 2,
            planes: 1,
            bits_per_pixel: 24,
            compression_type: 0,
            image_data_size: 16,
            h_pixels_per_meter: 0,
            v_pixels_per_meter: 0,
            colors_used: 0,
            colors_required: 0,
        };
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&[255, 0, 0, 255, 255, 255, 0, 0]);
        out.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0]);
        out
    }

    fn decode(data: &[u8]) -> Result<Bitmap, BmpError> {
        decode_bmp(&mut &data[..], None)
    }

    #[test]
    fn first_disk_row_is_bottom() {
        let bmp = decode(&bmp_2x2()).unwrap();
        assert_eq!(bmp.pixel_color(0, 0).unwrap(), RGB8::new(255, 0, 0));
        assert_eq!(bmp.pixel_color(1, 0).unwrap(), RGB8::new(0, 255, 0));
        assert_eq!(bmp.pixel_color(0, 1).unwrap(), RGB8::new(0, 0, 255));
        assert_eq!(bmp.pixel_color(1, 1).unwrap(), RGB8::new(255, 255, 255));
    }

    #[test]
    fn bad_magic_is_invalid_file() {
        let mut data = bmp_2x2();
        data[0] = b'X';
        data[1] = b'X';
        assert!(matches!(decode(&data), Err(BmpError::InvalidFile(_))));
    }

    #[test]
    fn short_header_is_invalid_file() {
        let data = bmp_2x2();
        assert!(matches!(decode(&data[..30]), Err(BmpError::InvalidFile(_))));
        assert!(matches!(decode(&[]), Err(BmpError::InvalidFile(_))));
    }

    #[test]
    fn unsupported_variants() {
        for (offset, value) in [(28usize, 16u32), (30, 1), (14, 124)] {
            let mut data = bmp_2x2();
            if offset == 28 {
                data[28..30].copy_from_slice(&(value as u16).to_le_bytes());
            } else {
                data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
            }
            let err = decode(&data).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedVariant, "offset {offset}");
        }
    }

    #[test]
    fn truncated_row_is_invalid_file() {
        let data = bmp_2x2();
        assert!(matches!(
            decode(&data[..data.len() - 6]),
            Err(BmpError::InvalidFile(_))
        ));
    }

    #[test]
    fn missing_final_padding_tolerated() {
        let data = bmp_2x2();
        let bmp = decode(&data[..data.len() - 2]).unwrap();
        assert_eq!(bmp.pixel_color(1, 0).unwrap(), RGB8::new(0, 255, 0));
    }

    #[test]
    fn truncated_palette_is_invalid_file() {
        let bmp = Bitmap::new(1, 1, BitDepth::Indexed8).unwrap();
        let data = bmp.to_bytes().unwrap();
        assert!(matches!(
            decode(&data[..54 + 500]),
            Err(BmpError::InvalidFile(_))
        ));
    }

    #[test]
    fn sizes_normalized_and_passthrough_kept() {
        let mut data = bmp_2x2();
        data[2..6].copy_from_slice(&0u32.to_le_bytes()); // file size
        data[6..8].copy_from_slice(&0x1234u16.to_le_bytes()); // reserved1
        data[34..38].copy_from_slice(&0u32.to_le_bytes()); // image data size
        data[46..50].copy_from_slice(&3u32.to_le_bytes()); // colors used
        let bmp = decode(&data).unwrap();
        let h = bmp.header();
        assert_eq!(h.image_data_size, 16);
        assert_eq!(h.file_size, 70);
        assert_eq!(h.data_offset, 54);
        assert_eq!(h.reserved1, 0x1234);
        assert_eq!(h.colors_used, 3);
    }

    #[test]
    fn gap_before_pixel_data_skipped() {
        let mut data = bmp_2x2();
        data[10..14].copy_from_slice(&58u32.to_le_bytes());
        let pixels = data.split_off(54);
        data.extend_from_slice(&[0xEE; 4]);
        data.extend_from_slice(&pixels);
        let bmp = decode(&data).unwrap();
        assert_eq!(bmp.pixel_color(0, 1).unwrap(), RGB8::new(0, 0, 255));
        assert_eq!(bmp.header().data_offset, 54);
    }

    #[test]
    fn zero_width_is_invalid_file() {
        let mut data = bmp_2x2();
        data[18..22].copy_from_slice(&0u32.to_le_bytes());
        assert!(matches!(decode(&data), Err(BmpError::InvalidFile(_))));
    }

    #[test]
    fn limits_checked_before_allocation() {
        let mut data = bmp_2x2();
        data[18..22].copy_from_slice(&100_000u32.to_le_bytes());
        data[22..26].copy_from_slice(&100_000u32.to_le_bytes());
        let limits = Limits {
            max_pixels: Some(1_000_000),
            ..Default::default()
        };
        assert!(matches!(
            decode_bmp(&mut &data[..], Some(&limits)),
            Err(BmpError::LimitExceeded(_))
        ));
    }
}
