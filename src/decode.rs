use std::io::Read;

use crate::bmp::Bitmap;
use crate::error::BmpError;
use crate::limits::Limits;

/// Decode configuration for a single byte source.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(16 << 20), ..Default::default() };
/// let bitmap = DecodeRequest::new(data).with_limits(&limits).decode()?;
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Debug)]
pub struct DecodeRequest<'a, R> {
    source: R,
    limits: Option<&'a Limits>,
}

impl<'a, R: Read> DecodeRequest<'a, R> {
    /// Decode from `source`, read sequentially from its current position.
    pub fn new(source: R) -> Self {
        Self {
            source,
            limits: None,
        }
    }

    /// Reject images exceeding `limits` before allocating their pixels.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(mut self) -> Result<Bitmap, BmpError> {
        crate::bmp::decode::decode_bmp(&mut self.source, self.limits)
    }
}
