//! Transmission buffers and the role index.

use alloc::boxed::Box;
use alloc::vec;

use pageflip_protocol::control;

/// Which physical buffer currently holds the front role
///
/// A single bit: buffer 0 is front while clear, buffer 1 while set. The
/// back role always belongs to the other buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoleIndex(bool);

impl RoleIndex {
    /// Buffer 0 front, buffer 1 back
    pub const fn new() -> Self {
        Self(false)
    }

    /// Slot of the front buffer
    pub const fn front(self) -> usize {
        self.0 as usize
    }

    /// Slot of the back buffer
    pub const fn back(self) -> usize {
        !self.0 as usize
    }

    /// Exchange the roles
    pub fn toggle(&mut self) {
        self.0 = !self.0;
    }
}

/// One frame ready for the wire
///
/// Byte 0 is the data-stream control byte and is never handed out
/// mutably; the pixel buffer is the view over bytes `1..`. Allocated once
/// and never resized.
#[derive(Debug)]
pub struct TxBuffer {
    bytes: Box<[u8]>,
    slot: usize,
}

impl TxBuffer {
    /// Allocate a zeroed buffer for `pixel_bytes` pixel bytes
    pub fn new(pixel_bytes: usize, slot: usize) -> Self {
        let mut bytes = vec![0u8; pixel_bytes + 1].into_boxed_slice();
        bytes[0] = control::DATA;
        Self { bytes, slot }
    }

    /// Stand-in left behind when a buffer is moved out of a canvas
    pub(crate) fn placeholder() -> Self {
        Self {
            bytes: Box::new([]),
            slot: usize::MAX,
        }
    }

    /// Physical slot (0 or 1) this buffer was allocated as
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Full transmission view: control byte then pixels
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pixel buffer view
    pub fn pixels(&self) -> &[u8] {
        self.bytes.get(1..).unwrap_or(&[])
    }

    /// Mutable pixel buffer view
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        match self.bytes.split_first_mut() {
            Some((_marker, pixels)) => pixels,
            None => &mut [],
        }
    }

    /// Zero every pixel
    pub fn clear(&mut self) {
        self.pixels_mut().fill(0);
    }
}
