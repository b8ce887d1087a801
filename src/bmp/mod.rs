//! The [`Bitmap`] image entity and its raster codec.

mod access;
pub(crate) mod decode;
mod encode;
mod palette;
pub(crate) mod utils;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub use palette::{PALETTE_ENTRIES, PALETTE_SIZE, Palette};

use crate::error::BmpError;
use crate::header::{BmpHeader, FILE_HEADER_SIZE, INFO_HEADER_SIZE, MAGIC};
use crate::pixel::BitDepth;

/// An uncompressed 8, 24 or 32-bit BMP image held in memory.
///
/// The pixel buffer keeps the on-disk row order: buffer row 0 is the bottom
/// row of the picture, and every row is [`row_stride`](Self::row_stride)
/// bytes long including its padding. The accessors take conventional
/// coordinates (`y = 0` is the top row) and flip them.
///
/// A `Bitmap` has no internal locking. Sharing one between threads for
/// mutation needs external synchronization (e.g. a `Mutex<Bitmap>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    header: BmpHeader,
    depth: BitDepth,
    palette: Option<Palette>,
    data: Vec<u8>,
}

impl Bitmap {
    /// Create a blank image: all pixels zero and, for 8-bit images, an
    /// all-black palette.
    pub fn new(width: u32, height: u32, depth: BitDepth) -> Result<Self, BmpError> {
        let header = blank_header(width, height, depth)?;
        let data = alloc_zeroed(header.image_data_size as usize)?;
        let palette = depth.is_indexed().then(Palette::new);
        Ok(Self {
            header,
            depth,
            palette,
            data,
        })
    }

    /// Decode a BMP from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BmpError> {
        let file = File::open(path)?;
        crate::DecodeRequest::new(BufReader::new(file)).decode()
    }

    /// Encode this image into a file, creating or truncating it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BmpError> {
        let file = File::create(path)?;
        let mut sink = BufWriter::new(file);
        self.write_to(&mut sink)?;
        sink.flush().map_err(BmpError::Io)
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Bytes per buffer row, padding included. Always a multiple of 4.
    pub fn row_stride(&self) -> usize {
        self.data.len() / self.header.height as usize
    }

    /// Change the width, keeping pixels whose column survives.
    ///
    /// New columns are zero. Fails with [`BmpError::InvalidArgument`] for a
    /// zero or unrepresentable width.
    pub fn set_width(&mut self, width: u32) -> Result<(), BmpError> {
        self.resize(width, self.header.height)
    }

    /// Change the height, keeping rows measured from the top.
    ///
    /// New rows at the bottom are zero. Fails with
    /// [`BmpError::InvalidArgument`] for a zero or unrepresentable height.
    pub fn set_height(&mut self, height: u32) -> Result<(), BmpError> {
        self.resize(self.header.width, height)
    }

    /// Set the resolution hints written to the header.
    pub fn set_resolution(&mut self, h_pixels_per_meter: u32, v_pixels_per_meter: u32) {
        self.header.h_pixels_per_meter = h_pixels_per_meter;
        self.header.v_pixels_per_meter = v_pixels_per_meter;
    }

    /// The whole pixel buffer, in on-disk row order with padding.
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The palette, present only for 8-bit images.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub fn palette_mut(&mut self) -> Option<&mut Palette> {
        self.palette.as_mut()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), BmpError> {
        let mut header = blank_header(width, height, self.depth)?;
        header.reserved1 = self.header.reserved1;
        header.reserved2 = self.header.reserved2;
        header.h_pixels_per_meter = self.header.h_pixels_per_meter;
        header.v_pixels_per_meter = self.header.v_pixels_per_meter;
        header.colors_used = self.header.colors_used;
        header.colors_required = self.header.colors_required;

        let mut data = alloc_zeroed(header.image_data_size as usize)?;
        let old_stride = self.row_stride();
        let new_stride = data.len() / height as usize;
        let old_height = self.header.height as usize;
        let new_height = height as usize;
        let bpp = self.depth.bytes_per_pixel();
        let keep = self.header.width.min(width) as usize * bpp;

        // Walk logical rows from the top; buffer rows are stored bottom-up.
        for y in 0..old_height.min(new_height) {
            let src = (old_height - y - 1) * old_stride;
            let dst = (new_height - y - 1) * new_stride;
            data[dst..dst + keep].copy_from_slice(&self.data[src..src + keep]);
        }

        self.header = header;
        self.data = data;
        Ok(())
    }

    pub(crate) fn from_parts(
        header: BmpHeader,
        depth: BitDepth,
        palette: Option<Palette>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            header,
            depth,
            palette,
            data,
        }
    }
}

/// Header for a fresh image with all size fields computed.
fn blank_header(width: u32, height: u32, depth: BitDepth) -> Result<BmpHeader, BmpError> {
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidArgument(format!(
            "dimensions must be non-zero, got {width}x{height}"
        )));
    }
    let image_data_size = utils::image_data_size(width, height, depth).ok_or_else(|| {
        BmpError::InvalidArgument(format!("{width}x{height} {depth} image is too large"))
    })?;
    let data_offset = data_offset(depth);
    let file_size = data_offset.checked_add(image_data_size).ok_or_else(|| {
        BmpError::InvalidArgument(format!("{width}x{height} {depth} image is too large"))
    })?;

    Ok(BmpHeader {
        magic: MAGIC,
        file_size,
        reserved1: 0,
        reserved2: 0,
        data_offset,
        header_size: INFO_HEADER_SIZE,
        width,
        height,
        planes: 1,
        bits_per_pixel: depth.bits(),
        compression_type: 0,
        image_data_size,
        h_pixels_per_meter: 0,
        v_pixels_per_meter: 0,
        colors_used: 0,
        colors_required: 0,
    })
}

/// Offset of the pixel data for a given depth: header plus optional palette.
pub(crate) fn data_offset(depth: BitDepth) -> u32 {
    let palette = if depth.is_indexed() { PALETTE_SIZE as u32 } else { 0 };
    FILE_HEADER_SIZE + INFO_HEADER_SIZE + palette
}

/// Zeroed buffer, reporting allocation failure instead of aborting.
pub(crate) fn alloc_zeroed(bytes: usize) -> Result<Vec<u8>, BmpError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes)
        .map_err(|_| BmpError::OutOfMemory { bytes })?;
    buf.resize(bytes, 0);
    Ok(buf)
}
