//! SSD1306 OLED transport
//!
//! Owns the I2C bus and the panel's device handle. Every send is a
//! blocking transmit; every bus failure except a failed probe is fatal.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use pageflip_hal::{I2cBusConfig, I2cMaster};
use pageflip_protocol::{
    control, flush_prefix, opcode, power_off_sequence, power_on_sequence, CommandList,
};

use crate::backend::FrameSink;
use crate::config::PanelConfig;

/// Abort on an unrecoverable bus condition
#[cold]
#[track_caller]
fn fatal<E: Debug>(operation: &'static str, error: E) -> ! {
    #[cfg(feature = "defmt")]
    defmt::error!("SSD1306 {}: unrecoverable bus error", operation);
    panic!("SSD1306 {}: {:?}", operation, error)
}

/// Marker for sends attempted after a failed probe
#[derive(Debug)]
struct NoDevice;

/// SSD1306 transport
pub struct Ssd1306<B: I2cMaster, D> {
    bus: B,
    /// `None` when the probe at construction found no panel
    device: Option<B::Device>,
    panel: PanelConfig,
    delay: D,
}

impl<B, D> Ssd1306<B, D>
where
    B: I2cMaster,
    D: DelayNs,
{
    /// Open the bus and attach the panel
    ///
    /// If no device answers at `panel.address` the transport is still
    /// returned, without a device; see [`Self::is_present`].
    pub fn new(mut bus: B, bus_config: &I2cBusConfig, panel: PanelConfig, mut delay: D) -> Self {
        if let Err(e) = bus.open(bus_config) {
            fatal("bus open", e);
        }

        let device = match bus.probe(panel.address) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("SSD1306 detected at {=u8:#x}", panel.address);

                let device = match bus.attach(&panel.device_config()) {
                    Ok(device) => device,
                    Err(e) => fatal("device attach", e),
                };

                #[cfg(feature = "defmt")]
                defmt::info!("SSD1306 attached at {=u32} Hz", panel.scl_speed_hz);

                // Power-on time before the controller accepts commands
                delay.delay_ms(panel.settle_ms);
                Some(device)
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("No SSD1306 detected at {=u8:#x}", panel.address);
                None
            }
        };

        Self {
            bus,
            device,
            panel,
            delay,
        }
    }

    /// Whether a panel answered the probe
    pub fn is_present(&self) -> bool {
        self.device.is_some()
    }

    /// Panel configuration
    pub fn panel(&self) -> &PanelConfig {
        &self.panel
    }

    /// Send the power-on sequence and wait for the panel to light up
    pub fn power_on(&mut self) {
        let init = power_on_sequence(self.panel.geometry(), self.panel.contrast);
        self.send_commands(&init);
        self.delay.delay_ms(self.panel.settle_ms);

        #[cfg(feature = "defmt")]
        defmt::info!("Display on");
    }

    /// Switch the panel off (sleep)
    pub fn power_off(&mut self) {
        self.send_commands(&power_off_sequence());

        #[cfg(feature = "defmt")]
        defmt::info!("Display off");
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) {
        let mut list = CommandList::new();
        list.push1(opcode::SET_CONTRAST, contrast);
        self.send_commands(&list);
        self.panel.contrast = contrast;
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) {
        let mut list = CommandList::new();
        list.push(if inverted {
            opcode::SET_INVERSE
        } else {
            opcode::SET_NORMAL
        });
        self.send_commands(&list);
    }

    /// Send one full frame
    ///
    /// `frame` must start with the data-stream control byte and hold
    /// every pixel byte of the panel.
    pub fn flush(&mut self, frame: &[u8]) {
        debug_assert_eq!(frame.first(), Some(&control::DATA));
        debug_assert_eq!(frame.len(), self.panel.frame_bytes() + 1);

        let prefix = flush_prefix(self.panel.geometry());
        self.send_commands(&prefix);
        self.send_data(frame);
    }

    /// Transmit a command stream
    pub fn send_commands(&mut self, commands: &CommandList) {
        self.transmit("command write", commands.as_bytes());
    }

    /// Transmit a data stream (already prefixed with the data control byte)
    pub fn send_data(&mut self, bytes: &[u8]) {
        self.transmit("data write", bytes);
    }

    fn transmit(&mut self, operation: &'static str, bytes: &[u8]) {
        let Some(device) = self.device.as_ref() else {
            fatal(operation, NoDevice);
        };
        if let Err(e) = self.bus.transmit(device, bytes) {
            fatal(operation, e);
        }
    }
}

impl<B, D> FrameSink for Ssd1306<B, D>
where
    B: I2cMaster,
    D: DelayNs,
{
    fn flush(&mut self, frame: &[u8]) {
        Ssd1306::flush(self, frame)
    }
}

impl<B: I2cMaster, D> Drop for Ssd1306<B, D> {
    fn drop(&mut self) {
        if let Some(device) = self.device.take() {
            if let Err(e) = self.bus.detach(device) {
                fatal("device detach", e);
            }
        }
        if let Err(e) = self.bus.close() {
            fatal("bus close", e);
        }
    }
}
