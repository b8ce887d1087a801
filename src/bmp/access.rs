//! Random access to single pixels and palette entries.

use rgb::RGB8;

use super::Bitmap;
use crate::error::BmpError;

impl Bitmap {
    /// Color of the pixel at `(x, y)`, with `y = 0` the top row.
    ///
    /// Indexed images resolve the pixel through the palette. In 32-bit
    /// images the fourth byte is ignored.
    pub fn pixel_color(&self, x: u32, y: u32) -> Result<RGB8, BmpError> {
        let off = self.pixel_offset(x, y)?;
        if let Some(palette) = &self.palette {
            return Ok(palette.color(self.data[off]));
        }
        let p = &self.data[off..off + 3];
        Ok(RGB8::new(p[2], p[1], p[0]))
    }

    /// Set the color of the pixel at `(x, y)`. 24 and 32-bit images only.
    ///
    /// The fourth byte of a 32-bit pixel is left as it was.
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: RGB8) -> Result<(), BmpError> {
        let off = self.pixel_offset(x, y)?;
        self.require_direct("set_pixel_color")?;
        let p = &mut self.data[off..off + 3];
        p[0] = color.b;
        p[1] = color.g;
        p[2] = color.r;
        Ok(())
    }

    /// Palette index of the pixel at `(x, y)`. 8-bit images only.
    pub fn pixel_index(&self, x: u32, y: u32) -> Result<u8, BmpError> {
        let off = self.pixel_offset(x, y)?;
        self.require_indexed("pixel_index")?;
        Ok(self.data[off])
    }

    /// Set the palette index of the pixel at `(x, y)`. 8-bit images only.
    pub fn set_pixel_index(&mut self, x: u32, y: u32, index: u8) -> Result<(), BmpError> {
        let off = self.pixel_offset(x, y)?;
        self.require_indexed("set_pixel_index")?;
        self.data[off] = index;
        Ok(())
    }

    /// Color of palette entry `index`. 8-bit images only.
    pub fn palette_color(&self, index: u8) -> Result<RGB8, BmpError> {
        match &self.palette {
            Some(palette) => Ok(palette.color(index)),
            None => Err(self.mismatch("palette_color")),
        }
    }

    /// Set palette entry `index`. 8-bit images only.
    pub fn set_palette_color(&mut self, index: u8, color: RGB8) -> Result<(), BmpError> {
        if self.palette.is_none() {
            return Err(self.mismatch("set_palette_color"));
        }
        if let Some(palette) = &mut self.palette {
            palette.set_color(index, color);
        }
        Ok(())
    }

    /// Byte offset of `(x, y)` in the buffer. Rows are stored bottom-up, so
    /// logical row `y` lives in buffer row `height - y - 1`.
    fn pixel_offset(&self, x: u32, y: u32) -> Result<usize, BmpError> {
        let (width, height) = (self.header.width, self.header.height);
        if x >= width || y >= height {
            return Err(BmpError::InvalidArgument(format!(
                "pixel ({x}, {y}) outside {width}x{height} image"
            )));
        }
        let row = (height - y - 1) as usize;
        Ok(row * self.row_stride() + x as usize * self.depth.bytes_per_pixel())
    }

    fn require_indexed(&self, operation: &'static str) -> Result<(), BmpError> {
        if self.depth.is_indexed() {
            Ok(())
        } else {
            Err(self.mismatch(operation))
        }
    }

    fn require_direct(&self, operation: &'static str) -> Result<(), BmpError> {
        if self.depth.is_indexed() {
            Err(self.mismatch(operation))
        } else {
            Ok(())
        }
    }

    fn mismatch(&self, operation: &'static str) -> BmpError {
        BmpError::TypeMismatch {
            operation,
            depth: self.depth.bits(),
        }
    }
}
