//! Row stride and padding arithmetic.

use crate::pixel::BitDepth;

/// Bytes of pixel data in one row, without padding. `None` on overflow.
pub(crate) fn row_data_bytes(width: u32, depth: BitDepth) -> Option<usize> {
    (width as usize).checked_mul(depth.bytes_per_pixel())
}

/// Row length rounded up to the next multiple of 4. `None` on overflow.
pub(crate) fn padded_row_bytes(width: u32, depth: BitDepth) -> Option<usize> {
    row_data_bytes(width, depth)?
        .checked_add(3)
        .map(|r| r & !3)
}

/// Zero bytes appended to each on-disk row.
pub(crate) fn padding_bytes(width: u32, depth: BitDepth) -> usize {
    let data = (width as usize).wrapping_mul(depth.bytes_per_pixel());
    (4 - data % 4) % 4
}

/// Total pixel data size (`padded_row_bytes * height`), if it fits the
/// header's u32 field.
pub(crate) fn image_data_size(width: u32, height: u32, depth: BitDepth) -> Option<u32> {
    let size = padded_row_bytes(width, depth)?.checked_mul(height as usize)?;
    u32::try_from(size).ok()
}
