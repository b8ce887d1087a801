//! BMP encoder: header, optional palette, then padded rows bottom-up.

use std::io::Write;

use super::{Bitmap, utils};
use crate::error::BmpError;

/// Write `bitmap` to `sink` in on-disk layout.
pub(crate) fn encode_bmp<W: Write + ?Sized>(bitmap: &Bitmap, sink: &mut W) -> Result<(), BmpError> {
    let header = bitmap.header();
    let (width, depth) = (header.width, bitmap.depth());
    log::debug!("encoding {width}x{} {depth} BMP", header.height);

    header.write_to(sink)?;
    if let Some(palette) = bitmap.palette() {
        sink.write_all(palette.as_bytes()).map_err(BmpError::Io)?;
    }

    // The buffer already holds rows bottom-up; only the data part of each row
    // is copied, and padding is always written as zeros.
    let row_bytes = width as usize * depth.bytes_per_pixel();
    let pad = [0u8; 3];
    let pad = &pad[..utils::padding_bytes(width, depth)];
    for row in bitmap.pixels().chunks_exact(bitmap.row_stride()) {
        sink.write_all(&row[..row_bytes]).map_err(BmpError::Io)?;
        sink.write_all(pad).map_err(BmpError::Io)?;
    }
    Ok(())
}

impl Bitmap {
    /// Encode this image to `sink`.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), BmpError> {
        encode_bmp(self, sink)
    }

    /// Encode this image into a new byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BmpError> {
        let mut out = Vec::with_capacity(self.header().file_size as usize);
        encode_bmp(self, &mut out)?;
        Ok(out)
    }
}
