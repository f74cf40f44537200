//! Surface geometry and pixel addressing.
//!
//! Pixels are packed in SSD1306 page order: each byte holds a vertical run
//! of 8 pixels, bit 0 at the top. Pixel (x, y) lives in bit `y & 7` of
//! byte `(y >> 3) * width + x`.

use pageflip_protocol::Geometry;

use super::EngineError;

/// Display surface dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Surface {
    width: u16,
    height: u16,
}

impl Surface {
    /// Create a surface; height must be a non-zero multiple of 8 and
    /// span at most 255 pages
    pub fn new(width: u16, height: u16) -> Result<Self, EngineError> {
        if width == 0 || height == 0 || height % 8 != 0 || height / 8 > 255 {
            return Err(EngineError::InvalidSurface);
        }
        Ok(Self { width, height })
    }

    /// Surface matching a panel geometry
    pub fn from_geometry(geometry: Geometry) -> Result<Self, EngineError> {
        Self::new(geometry.width, geometry.height)
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of 8-row pages
    pub const fn pages(&self) -> u16 {
        self.height / 8
    }

    /// Length of a pixel buffer
    pub const fn pixel_bytes(&self) -> usize {
        self.width as usize * self.height as usize / 8
    }

    /// Length of a transmission buffer (pixel buffer plus control byte)
    pub const fn tx_bytes(&self) -> usize {
        self.pixel_bytes() + 1
    }

    /// Whether (x, y) is on the surface
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y)
    }

    /// Byte index and bit mask of pixel (x, y), `None` when off-surface
    pub fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if !self.contains(x, y) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y >> 3) * self.width as usize + x, 1 << (y & 7)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_rejects_bad_dimensions() {
        assert_eq!(Surface::new(0, 32), Err(EngineError::InvalidSurface));
        assert_eq!(Surface::new(128, 0), Err(EngineError::InvalidSurface));
        assert_eq!(Surface::new(128, 30), Err(EngineError::InvalidSurface));
        assert_eq!(Surface::new(8, 2048), Err(EngineError::InvalidSurface));
        assert!(Surface::new(128, 32).is_ok());
    }

    #[test]
    fn test_128x32_sizes() {
        let surface = Surface::new(128, 32).unwrap();
        assert_eq!(surface.pixel_bytes(), 512);
        assert_eq!(surface.tx_bytes(), 513);
        assert_eq!(surface.pages(), 4);
    }

    #[test]
    fn test_locate_corners() {
        let surface = Surface::new(128, 32).unwrap();
        assert_eq!(surface.locate(0, 0), Some((0, 0x01)));
        assert_eq!(surface.locate(127, 31), Some((511, 0x80)));
        assert_eq!(surface.locate(5, 9), Some((128 + 5, 0x02)));
    }

    #[test]
    fn test_locate_off_surface() {
        let surface = Surface::new(128, 32).unwrap();
        assert_eq!(surface.locate(-1, 0), None);
        assert_eq!(surface.locate(0, -1), None);
        assert_eq!(surface.locate(128, 0), None);
        assert_eq!(surface.locate(0, 32), None);
    }

    #[test]
    fn test_from_geometry() {
        let surface = Surface::from_geometry(Geometry::W128_H64).unwrap();
        assert_eq!((surface.width(), surface.height()), (128, 64));
    }
}
