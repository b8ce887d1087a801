//! # zenbmp
//!
//! Decoder and encoder for uncompressed Windows BMP images, with direct
//! pixel and palette access on the decoded buffer.
//!
//! ## Supported Formats
//!
//! - 8-bit indexed, with a 256-entry palette
//! - 24-bit BGR
//! - 32-bit BGR plus an unused byte (kept as-is, never interpreted)
//!
//! Only the 40-byte `BITMAPINFOHEADER` with `BI_RGB` (no compression) is
//! accepted.
//!
//! ## Memory Layout
//!
//! [`Bitmap::pixels`] exposes the buffer exactly as the rows appear on disk:
//! bottom row first, each row padded to a multiple of 4 bytes. The pixel
//! accessors use top-down coordinates and do the flip for you.
//!
//! ## Non-Goals
//!
//! - RLE, bitfields, embedded JPEG/PNG
//! - 1, 2, 4 and 16-bit depths
//! - Color management (ICC profiles, V4/V5 headers)
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{BitDepth, Bitmap};
//! use rgb::RGB8;
//!
//! let mut image = Bitmap::new(2, 2, BitDepth::Rgb24)?;
//! image.set_pixel_color(0, 0, RGB8::new(255, 0, 0))?;
//!
//! let encoded = zenbmp::encode(&image)?;
//! let decoded = zenbmp::decode(&encoded)?;
//! assert_eq!(decoded.pixel_color(0, 0)?, RGB8::new(255, 0, 0));
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod decode;
mod error;
pub mod header;
mod limits;
mod pixel;

// Re-exports
pub use bmp::{Bitmap, PALETTE_ENTRIES, PALETTE_SIZE, Palette};
pub use decode::DecodeRequest;
pub use error::{BmpError, ErrorKind};
pub use header::BmpHeader;
pub use limits::Limits;
pub use pixel::BitDepth;
pub use rgb::RGB8;

/// Decode a BMP held in memory.
pub fn decode(data: &[u8]) -> Result<Bitmap, BmpError> {
    DecodeRequest::new(data).decode()
}

/// Encode `bitmap` into a new byte vector.
pub fn encode(bitmap: &Bitmap) -> Result<Vec<u8>, BmpError> {
    bitmap.to_bytes()
}
