//! SSD1306 transport and frame sink abstraction
//!
//! This crate provides:
//! - `Ssd1306`, the bus transport that owns the I2C device and pushes
//!   command and data streams to the panel
//! - `FrameSink`, the seam through which a refresh task hands complete
//!   frames to a transport
//! - `PanelConfig`, the per-panel settings (geometry, address, contrast)
//!
//! # Failure policy
//!
//! A missing panel at construction time is tolerated: the transport is
//! still built, logs the failure and reports [`Ssd1306::is_present`] as
//! `false`. Any other bus failure (open, attach, transmit, teardown), and
//! any send to a missing panel, is fatal and panics.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod config;
pub mod ssd1306;

// Re-export key types
pub use backend::FrameSink;
pub use config::{ConfigError, PanelConfig};
pub use ssd1306::Ssd1306;
