//! The fixed 54-byte BMP preamble: 14-byte file header followed by the
//! 40-byte `BITMAPINFOHEADER`.
//!
//! Fields are translated verbatim. Nothing is validated here; the raster
//! decoder checks magic, depth, compression and header size right after
//! [`BmpHeader::read_from`] returns.

use std::io::{Read, Write};

use crate::error::BmpError;

/// `"BM"` as stored on disk.
pub const MAGIC: [u8; 2] = *b"BM";

/// Size of the `BITMAPINFOHEADER` variant, the only one supported.
pub const INFO_HEADER_SIZE: u32 = 40;

/// Bytes before the info header (magic, file size, reserved, data offset).
pub const FILE_HEADER_SIZE: u32 = 14;

/// In-memory form of the BMP preamble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BmpHeader {
    pub magic: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset of the first pixel row from the start of the file.
    pub data_offset: u32,
    pub header_size: u32,
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression_type: u32,
    /// Length of the pixel data including row padding.
    pub image_data_size: u32,
    pub h_pixels_per_meter: u32,
    pub v_pixels_per_meter: u32,
    pub colors_used: u32,
    pub colors_required: u32,
}

impl BmpHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = 54;

    /// Read the 54 header bytes from `source`.
    ///
    /// A short read surfaces as [`BmpError::Io`] with
    /// [`std::io::ErrorKind::UnexpectedEof`].
    pub fn read_from<R: Read + ?Sized>(source: &mut R) -> Result<Self, BmpError> {
        let mut buf = [0u8; Self::SIZE];
        source.read_exact(&mut buf).map_err(BmpError::Io)?;
        Ok(Self::from_bytes(&buf))
    }

    /// Write the 54 header bytes to `sink`.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> Result<(), BmpError> {
        sink.write_all(&self.to_bytes()).map_err(BmpError::Io)
    }

    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        let mut f = Fields { bytes, pos: 0 };
        Self {
            magic: [f.u8(), f.u8()],
            file_size: f.u32(),
            reserved1: f.u16(),
            reserved2: f.u16(),
            data_offset: f.u32(),
            header_size: f.u32(),
            width: f.u32(),
            height: f.u32(),
            planes: f.u16(),
            bits_per_pixel: f.u16(),
            compression_type: f.u32(),
            image_data_size: f.u32(),
            h_pixels_per_meter: f.u32(),
            v_pixels_per_meter: f.u32(),
            colors_used: f.u32(),
            colors_required: f.u32(),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        let mut pos = 0;
        let mut put = |field: &[u8]| {
            out[pos..pos + field.len()].copy_from_slice(field);
            pos += field.len();
        };
        put(&self.magic);
        put(&self.file_size.to_le_bytes());
        put(&self.reserved1.to_le_bytes());
        put(&self.reserved2.to_le_bytes());
        put(&self.data_offset.to_le_bytes());
        put(&self.header_size.to_le_bytes());
        put(&self.width.to_le_bytes());
        put(&self.height.to_le_bytes());
        put(&self.planes.to_le_bytes());
        put(&self.bits_per_pixel.to_le_bytes());
        put(&self.compression_type.to_le_bytes());
        put(&self.image_data_size.to_le_bytes());
        put(&self.h_pixels_per_meter.to_le_bytes());
        put(&self.v_pixels_per_meter.to_le_bytes());
        put(&self.colors_used.to_le_bytes());
        put(&self.colors_required.to_le_bytes());
        out
    }
}

// Sequential little-endian field reader over a complete header buffer.
struct Fields<'a> {
    bytes: &'a [u8; BmpHeader::SIZE],
    pos: usize,
}

impl Fields<'_> {
    fn u8(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        b
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes([self.u8(), self.u8()])
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes([self.u8(), self.u8(), self.u8(), self.u8()])
    }
}
