use rgb::RGB8;

/// Number of palette entries in an 8-bit image.
pub const PALETTE_ENTRIES: usize = 256;

/// Encoded palette size: 256 entries of blue, green, red, unused.
pub const PALETTE_SIZE: usize = PALETTE_ENTRIES * 4;

/// Color table of an indexed (8-bit) image.
///
/// Stored exactly as on disk, so [`as_bytes`](Self::as_bytes) is the
/// 1024-byte block that follows the header.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Box<[u8; PALETTE_SIZE]>,
}

impl Palette {
    /// All-black palette.
    pub fn new() -> Self {
        Self {
            entries: Box::new([0u8; PALETTE_SIZE]),
        }
    }

    pub(crate) fn from_bytes(bytes: Box<[u8; PALETTE_SIZE]>) -> Self {
        Self { entries: bytes }
    }

    pub fn color(&self, index: u8) -> RGB8 {
        let off = usize::from(index) * 4;
        let e = &self.entries[off..off + 4];
        RGB8::new(e[2], e[1], e[0])
    }

    /// Set the color of entry `index`. The entry's fourth byte is untouched.
    pub fn set_color(&mut self, index: u8, color: RGB8) {
        let off = usize::from(index) * 4;
        let e = &mut self.entries[off..off + 4];
        e[0] = color.b;
        e[1] = color.g;
        e[2] = color.r;
    }

    pub fn as_bytes(&self) -> &[u8; PALETTE_SIZE] {
        &self.entries
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; PALETTE_SIZE] {
        &mut self.entries
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Palette {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Palette")
            .field("entries", &PALETTE_ENTRIES)
            .finish_non_exhaustive()
    }
}
