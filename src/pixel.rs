use core::fmt;

use crate::error::BmpError;

/// Supported BMP color depths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 8 bits per pixel, each pixel an index into a 256-entry palette.
    Indexed8,
    /// 24 bits per pixel, B, G, R.
    Rgb24,
    /// 32 bits per pixel, B, G, R plus a fourth byte the accessors leave alone.
    Rgb32,
}

impl BitDepth {
    /// Bits per pixel as stored in the header.
    pub const fn bits(self) -> u16 {
        match self {
            Self::Indexed8 => 8,
            Self::Rgb24 => 24,
            Self::Rgb32 => 32,
        }
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Indexed8 => 1,
            Self::Rgb24 => 3,
            Self::Rgb32 => 4,
        }
    }

    /// Whether pixels are palette indices rather than colors.
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::Indexed8)
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = BmpError;

    fn try_from(bits: u16) -> Result<Self, BmpError> {
        match bits {
            8 => Ok(Self::Indexed8),
            24 => Ok(Self::Rgb24),
            32 => Ok(Self::Rgb32),
            other => Err(BmpError::UnsupportedVariant(format!(
                "{other} bits per pixel (must be 8, 24 or 32)"
            ))),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> u16 {
        depth.bits()
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
