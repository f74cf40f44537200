//! Glyph tables
//!
//! Fonts use the Adafruit GFX layout: a packed 1-bit bitmap shared by all
//! glyphs, and one [`Glyph`] record per character code in
//! `first..=last`. Each glyph's bits run row-major, most significant bit
//! first, continuing across byte boundaries with no row padding.

mod ascii;
mod digits;

pub use ascii::ASCII_3X5;
pub use digits::DIGITS_3X5;

/// Per-character rasterization metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    /// Offset of the first bitmap byte
    pub bitmap_offset: u16,
    /// Width in pixels
    pub width: u8,
    /// Height in pixels
    pub height: u8,
    /// Cursor advance after this glyph
    pub x_advance: u8,
    /// Horizontal offset from the cursor to the bitmap's left edge
    pub x_offset: i8,
    /// Vertical offset from the baseline to the bitmap's top edge
    pub y_offset: i8,
}

/// Immutable glyph table
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    /// Packed glyph bitmaps
    pub bitmap: &'a [u8],
    /// Glyph records for `first..=last`
    pub glyphs: &'a [Glyph],
    /// First character code
    pub first: u8,
    /// Last character code
    pub last: u8,
    /// Line advance for `\n`
    pub y_advance: u8,
}

impl<'a> Font<'a> {
    /// Glyph for `code`, `None` outside the table
    pub fn glyph(&self, code: u8) -> Option<&'a Glyph> {
        if code < self.first || code > self.last {
            return None;
        }
        self.glyphs.get((code - self.first) as usize)
    }

    /// Set pixels of `glyph` as (column, row) within its bounding box
    pub fn pixels(&self, glyph: &Glyph) -> GlyphPixels<'a> {
        GlyphPixels {
            bitmap: self.bitmap,
            offset: glyph.bitmap_offset as usize,
            width: glyph.width as usize,
            bit: 0,
            bits: glyph.width as usize * glyph.height as usize,
        }
    }
}

/// Iterator over the set bits of one glyph
pub struct GlyphPixels<'a> {
    bitmap: &'a [u8],
    offset: usize,
    width: usize,
    bit: usize,
    bits: usize,
}

impl Iterator for GlyphPixels<'_> {
    type Item = (u8, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.bit < self.bits {
            let bit = self.bit;
            self.bit += 1;

            // Truncated bitmaps read as unset
            let byte = self
                .bitmap
                .get(self.offset + bit / 8)
                .copied()
                .unwrap_or(0);
            if byte & (0x80 >> (bit % 8)) != 0 {
                return Some(((bit % self.width) as u8, (bit / self.width) as u8));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITMAP: [u8; 2] = [0b1000_0001, 0b1100_0000];
    const GLYPHS: [Glyph; 1] = [Glyph {
        bitmap_offset: 0,
        width: 5,
        height: 2,
        x_advance: 6,
        x_offset: 0,
        y_offset: -2,
    }];
    const FONT: Font<'static> = Font {
        bitmap: &BITMAP,
        glyphs: &GLYPHS,
        first: b'x',
        last: b'x',
        y_advance: 3,
    };

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(FONT.glyph(b'x'), Some(&GLYPHS[0]));
        assert_eq!(FONT.glyph(b'w'), None);
        assert_eq!(FONT.glyph(b'y'), None);
    }

    #[test]
    fn test_bits_cross_byte_boundary() {
        let glyph = FONT.glyph(b'x').unwrap();
        let pixels: Vec<_> = FONT.pixels(glyph).collect();
        // bits 0, 7, 8, 9 of a 5-wide glyph
        assert_eq!(pixels, vec![(0, 0), (2, 1), (3, 1), (4, 1)]);
    }

    #[test]
    fn test_truncated_bitmap_reads_unset() {
        let glyph = Glyph {
            bitmap_offset: 1,
            width: 8,
            height: 2,
            x_advance: 8,
            x_offset: 0,
            y_offset: 0,
        };
        let pixels: Vec<_> = FONT.pixels(&glyph).collect();
        assert_eq!(pixels, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_empty_glyph_has_no_pixels() {
        let glyph = Glyph {
            bitmap_offset: 0,
            width: 0,
            height: 0,
            x_advance: 2,
            x_offset: 0,
            y_offset: 0,
        };
        assert_eq!(FONT.pixels(&glyph).count(), 0);
    }
}
