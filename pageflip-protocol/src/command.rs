//! Command stream encoding.
//!
//! A command stream is a single control byte followed by any number of
//! opcodes, each carrying zero, one or two argument bytes. The encoder
//! does not check opcode semantics.

use alloc::vec::Vec;

/// Control bytes that prefix every transfer
pub mod control {
    /// The following bytes are commands
    pub const COMMAND: u8 = 0x00;
    /// The following bytes are display RAM data
    pub const DATA: u8 = 0x40;
}

/// SSD1306 opcodes
pub mod opcode {
    /// Memory addressing mode (1 arg)
    pub const SET_MEMORY_MODE: u8 = 0x20;
    /// Column range for horizontal/vertical addressing (2 args)
    pub const SET_COLUMN_RANGE: u8 = 0x21;
    /// Page range for horizontal/vertical addressing (2 args)
    pub const SET_PAGE_RANGE: u8 = 0x22;
    /// Deactivate scrolling
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    /// Display start line (OR with line 0-63)
    pub const SET_START_LINE: u8 = 0x40;
    /// Contrast (1 arg)
    pub const SET_CONTRAST: u8 = 0x81;
    /// Charge pump setting (1 arg)
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    /// Column address 127 is mapped to SEG0
    pub const SET_SEG_REMAP: u8 = 0xA1;
    /// Output follows RAM content
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    /// Lit pixel is a 1 bit
    pub const SET_NORMAL: u8 = 0xA6;
    /// Lit pixel is a 0 bit
    pub const SET_INVERSE: u8 = 0xA7;
    /// Multiplex ratio (1 arg)
    pub const SET_MUX_RATIO: u8 = 0xA8;
    /// Panel off (sleep)
    pub const DISPLAY_OFF: u8 = 0xAE;
    /// Panel on
    pub const DISPLAY_ON: u8 = 0xAF;
    /// Scan COM outputs from COM[N-1] to COM0
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    /// Vertical display offset (1 arg)
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    /// Clock divide ratio / oscillator frequency (1 arg)
    ///
    /// Some published init tables send 0x5D here; 0xD5 is the datasheet
    /// opcode.
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    /// Pre-charge period (1 arg)
    pub const SET_PRECHARGE: u8 = 0xD9;
    /// COM pins hardware configuration (1 arg)
    pub const SET_COM_PINS: u8 = 0xDA;
    /// VCOMH deselect level (1 arg)
    ///
    /// Some published init tables send 0xD8 here; 0xDB is the datasheet
    /// opcode.
    pub const SET_VCOM_DESELECT: u8 = 0xDB;
    /// No operation
    pub const NOP: u8 = 0xE3;
}

/// Ordered command stream, always starting with [`control::COMMAND`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandList {
    bytes: Vec<u8>,
}

impl Default for CommandList {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandList {
    /// Create an empty command stream (marker byte only)
    pub fn new() -> Self {
        let mut bytes = Vec::with_capacity(32);
        bytes.push(control::COMMAND);
        Self { bytes }
    }

    /// Append a bare opcode
    pub fn push(&mut self, op: u8) -> &mut Self {
        self.bytes.push(op);
        self
    }

    /// Append an opcode with one argument
    pub fn push1(&mut self, op: u8, arg: u8) -> &mut Self {
        self.bytes.extend_from_slice(&[op, arg]);
        self
    }

    /// Append an opcode with two arguments
    pub fn push2(&mut self, op: u8, arg1: u8, arg2: u8) -> &mut Self {
        self.bytes.extend_from_slice(&[op, arg1, arg2]);
        self
    }

    /// The full stream, marker included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes in the stream, marker included
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when nothing but the marker has been added
    pub fn is_empty(&self) -> bool {
        self.bytes.len() == 1
    }
}
