//! Panel configuration
//!
//! Per-panel settings that do not change after the transport is built.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use pageflip_hal::I2cDeviceConfig;
use pageflip_protocol::Geometry;

/// Widest panel the controller can drive
pub const MAX_WIDTH: u16 = 128;

/// Tallest panel the controller can drive
pub const MAX_HEIGHT: u16 = 64;

/// Panel configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width is zero or wider than the controller RAM
    InvalidWidth,
    /// Height is zero, not a multiple of 8, or taller than the controller RAM
    InvalidHeight,
    /// Address is outside the 7-bit non-reserved range
    InvalidAddress,
}

/// SSD1306 panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels (multiple of 8)
    pub height: u16,
    /// 7-bit I2C address (0x3C or 0x3D on most modules)
    pub address: u8,
    /// SCL frequency in Hz
    pub scl_speed_hz: u32,
    /// Contrast set at power-on
    pub contrast: u8,
    /// Settle time after attach and after switching the panel on, in ms
    pub settle_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::W128_H32
    }
}

impl PanelConfig {
    /// 128x32 module at 0x3C, fast-mode I2C
    pub const W128_H32: Self = Self {
        width: 128,
        height: 32,
        address: 0x3C,
        scl_speed_hz: I2cDeviceConfig::FAST_HZ,
        contrast: 0xAF,
        settle_ms: 100,
    };

    /// 128x64 module at 0x3C, fast-mode I2C
    pub const W128_H64: Self = Self {
        height: 64,
        ..Self::W128_H32
    };

    /// Panel geometry
    pub const fn geometry(&self) -> Geometry {
        Geometry::new(self.width, self.height)
    }

    /// Device attach configuration for this panel
    pub fn device_config(&self) -> I2cDeviceConfig {
        I2cDeviceConfig {
            scl_speed_hz: self.scl_speed_hz,
            ..I2cDeviceConfig::fast(self.address)
        }
    }

    /// Bytes in one frame, without the control byte
    pub const fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize / 8
    }

    /// Check the configuration against controller limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(ConfigError::InvalidWidth);
        }
        if self.height == 0 || self.height % 8 != 0 || self.height > MAX_HEIGHT {
            return Err(ConfigError::InvalidHeight);
        }
        if !(0x08..=0x77).contains(&self.address) {
            return Err(ConfigError::InvalidAddress);
        }
        Ok(())
    }
}
