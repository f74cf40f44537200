//! Pageflip Hardware Abstraction Layer
//!
//! This crate defines the I2C bus boundary consumed by the display
//! transport. A bus is opened with a [`I2cBusConfig`], devices are probed
//! by 7-bit address and attached with an [`I2cDeviceConfig`], and every
//! transfer is a blocking transmit with no timeout.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pageflip-display (Ssd1306 transport)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pageflip-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  EmbeddedHalBus<any embedded-hal I2c>   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cMaster`] - bus lifecycle, probe, attach and transmit

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod i2c;

// Re-export key types at crate root for convenience
pub use bus::{AttachedDevice, EmbeddedHalBus};
pub use i2c::{
    AddressLength, ClockSource, I2cBusConfig, I2cDeviceConfig, I2cError, I2cMaster, Port,
};
