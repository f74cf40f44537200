//! Fixed command sequences.
//!
//! The power-on and flush-prefix streams only depend on the panel
//! geometry (and the chosen contrast), so they are rebuilt on demand
//! rather than stored.

use crate::command::{opcode, CommandList};

/// Horizontal addressing: column pointer wraps into the next page
const HORIZONTAL_ADDRESSING: u8 = 0x00;

/// Divide ratio 1, default oscillator frequency
const CLOCK_DIV_DEFAULT: u8 = 0x80;

/// Enable the internal charge pump
const CHARGE_PUMP_ON: u8 = 0x14;

/// Sequential COM pin layout (32-row panels)
const COM_PINS_SEQUENTIAL: u8 = 0x02;

/// Alternative COM pin layout (64-row panels)
const COM_PINS_ALTERNATIVE: u8 = 0x12;

/// Phase 1 = 1 DCLK, phase 2 = 15 DCLK
const PRECHARGE_PERIOD: u8 = 0xF1;

/// VCOMH deselect ~0.77 x VCC
const VCOM_DESELECT_LEVEL: u8 = 0x40;

/// Panel geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Width in pixels (columns)
    pub width: u16,
    /// Height in pixels (rows, multiple of 8)
    pub height: u16,
}

impl Geometry {
    /// 128x32 panel
    pub const W128_H32: Self = Self::new(128, 32);

    /// 128x64 panel
    pub const W128_H64: Self = Self::new(128, 64);

    /// Create a geometry
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Number of 8-row pages
    pub const fn pages(&self) -> u16 {
        self.height / 8
    }

    /// Index of the last column
    pub fn last_column(&self) -> u8 {
        clamp_u8(self.width.saturating_sub(1))
    }

    /// Index of the last page
    pub fn last_page(&self) -> u8 {
        clamp_u8(self.pages().saturating_sub(1))
    }

    /// Multiplex ratio argument (rows - 1)
    pub fn mux_ratio(&self) -> u8 {
        clamp_u8(self.height.saturating_sub(1))
    }

    /// COM pins configuration argument
    pub fn com_pins(&self) -> u8 {
        if self.height <= 32 {
            COM_PINS_SEQUENTIAL
        } else {
            COM_PINS_ALTERNATIVE
        }
    }
}

fn clamp_u8(value: u16) -> u8 {
    value.min(u8::MAX as u16) as u8
}

/// Power-up sequence, ending with the panel switched on
pub fn power_on_sequence(geometry: Geometry, contrast: u8) -> CommandList {
    let mut list = CommandList::new();
    // 0xD5, not the 0x5D found in some init tables
    list.push1(opcode::SET_CLOCK_DIV, CLOCK_DIV_DEFAULT)
        .push1(opcode::SET_MUX_RATIO, geometry.mux_ratio())
        .push1(opcode::SET_DISPLAY_OFFSET, 0x00)
        .push(opcode::SET_START_LINE)
        .push1(opcode::SET_CHARGE_PUMP, CHARGE_PUMP_ON)
        .push1(opcode::SET_MEMORY_MODE, HORIZONTAL_ADDRESSING)
        .push(opcode::SET_SEG_REMAP)
        .push(opcode::SET_COM_SCAN_DEC)
        .push1(opcode::SET_COM_PINS, geometry.com_pins())
        .push1(opcode::SET_CONTRAST, contrast)
        .push1(opcode::SET_PRECHARGE, PRECHARGE_PERIOD)
        // 0xDB, not the 0xD8 found in some init tables
        .push1(opcode::SET_VCOM_DESELECT, VCOM_DESELECT_LEVEL)
        .push(opcode::RESUME_FROM_RAM)
        .push(opcode::SET_NORMAL)
        .push(opcode::DEACTIVATE_SCROLL)
        .push(opcode::DISPLAY_ON);
    list
}

/// Panel-off sequence
pub fn power_off_sequence() -> CommandList {
    let mut list = CommandList::new();
    list.push(opcode::DISPLAY_OFF);
    list
}

/// Addressing prefix sent before every full-frame data transfer
///
/// Resets the RAM pointer to column 0 / page 0 and spans the whole
/// surface, so the following data stream fills the panel exactly once.
pub fn flush_prefix(geometry: Geometry) -> CommandList {
    let mut list = CommandList::new();
    list.push1(opcode::SET_MEMORY_MODE, HORIZONTAL_ADDRESSING)
        .push2(opcode::SET_COLUMN_RANGE, 0, geometry.last_column())
        .push2(opcode::SET_PAGE_RANGE, 0, geometry.last_page());
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::control;

    #[test]
    #[rustfmt::skip]
    fn test_power_on_sequence_128x32() {
        let list = power_on_sequence(Geometry::W128_H32, 0xAF);
        assert_eq!(
            list.as_bytes(),
            &[
                control::COMMAND,
                0xD5, 0x80, // clock divider
                0xA8, 31, // multiplex
                0xD3, 0x00, // display offset
                0x40, // start line
                0x8D, 0x14, // charge pump
                0x20, 0x00, // addressing mode
                0xA1, // segment remap
                0xC8, // COM scan direction
                0xDA, 0x02, // COM pins
                0x81, 0xAF, // contrast
                0xD9, 0xF1, // pre-charge
                0xDB, 0x40, // VCOM deselect
                0xA4, // resume from RAM
                0xA6, // normal polarity
                0x2E, // scroll off
                0xAF, // panel on
            ]
        );
    }

    #[test]
    fn test_power_on_sequence_tracks_height() {
        let list = power_on_sequence(Geometry::W128_H64, 0x7F);
        let bytes = list.as_bytes();

        // mux ratio, COM pins and contrast follow the panel
        assert_eq!(&bytes[3..5], &[0xA8, 63]);
        assert_eq!(&bytes[14..16], &[0xDA, 0x12]);
        assert_eq!(&bytes[16..18], &[0x81, 0x7F]);
        assert_eq!(bytes.last(), Some(&opcode::DISPLAY_ON));
    }

    #[test]
    fn test_power_on_uses_datasheet_opcodes() {
        let list = power_on_sequence(Geometry::W128_H32, 0xAF);
        let bytes = list.as_bytes();

        assert_eq!(&bytes[1..3], &[0xD5, 0x80]);
        assert_eq!(&bytes[20..22], &[0xDB, 0x40]);
        assert!(!bytes.contains(&0x5D));
        assert!(!bytes.contains(&0xD8));
    }

    #[test]
    fn test_power_off_sequence() {
        assert_eq!(power_off_sequence().as_bytes(), &[0x00, 0xAE]);
    }

    #[test]
    fn test_flush_prefix_covers_full_surface() {
        assert_eq!(
            flush_prefix(Geometry::W128_H32).as_bytes(),
            &[0x00, 0x20, 0x00, 0x21, 0, 127, 0x22, 0, 3]
        );
        assert_eq!(
            flush_prefix(Geometry::new(64, 48)).as_bytes(),
            &[0x00, 0x20, 0x00, 0x21, 0, 63, 0x22, 0, 5]
        );
    }

    #[test]
    fn test_geometry_helpers() {
        let g = Geometry::W128_H32;
        assert_eq!(g.pages(), 4);
        assert_eq!(g.last_column(), 127);
        assert_eq!(g.last_page(), 3);
        assert_eq!(g.mux_ratio(), 31);
        assert_eq!(g.com_pins(), 0x02);
    }
}
