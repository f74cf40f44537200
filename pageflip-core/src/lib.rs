//! Board-agnostic framebuffer and refresh engine
//!
//! This crate contains everything between the drawing code and the bus
//! transport:
//!
//! - Surface geometry and bit-level pixel addressing
//! - Two transmission buffers whose front/back roles are swapped by a
//!   single role index
//! - The drawing API (pixels, rectangles, images, glyphs, text)
//! - The refresh task that pushes the front buffer to a [`FrameSink`]
//! - Glyph tables in the Adafruit GFX layout
//!
//! # Concurrency
//!
//! The [`Canvas`] owns the back buffer outright, so drawing takes no lock.
//! The front buffer and the role index sit behind one async mutex; a swap
//! exchanges the canvas' buffer with the front buffer under that mutex and
//! then wakes the [`Refresher`], which holds the same mutex only while the
//! frame is on the bus.
//!
//! [`FrameSink`]: pageflip_display::FrameSink

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod font;
pub mod framebuffer;

pub use config::EngineConfig;
pub use font::{Font, Glyph};
pub use framebuffer::{Canvas, Engine, EngineError, Refresher, RoleIndex, Surface, TxBuffer};
