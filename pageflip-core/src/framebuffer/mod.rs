//! Double-buffered framebuffer
//!
//! Two transmission buffers exist for the lifetime of an [`Engine`]. One
//! holds the front role (sent to the panel), the other the back role
//! (drawn into). The [`RoleIndex`] records which physical buffer is front;
//! it only changes inside [`Canvas::swap_and_signal`], under the engine's
//! mutex.

mod buffer;
mod canvas;
mod engine;
mod refresh;
mod surface;

pub use buffer::{RoleIndex, TxBuffer};
pub use canvas::Canvas;
pub use engine::Engine;
pub use refresh::Refresher;
pub use surface::Surface;

/// Engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Zero-sized surface, or height not a multiple of 8
    InvalidSurface,
    /// The engine's canvas is already handed out
    CanvasInUse,
    /// Image length does not match the pixel buffer
    ImageSize {
        /// Pixel buffer length
        expected: usize,
        /// Supplied image length
        actual: usize,
    },
}
