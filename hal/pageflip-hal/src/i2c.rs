//! I2C bus abstractions
//!
//! Provides the bus-master trait and the configuration records used to
//! open a bus and attach a device to it.

/// I2C bus master
///
/// Owns one physical bus. Devices are attached to the bus and addressed
/// through the handle returned by [`I2cMaster::attach`]. All operations
/// block until the underlying driver completes or fails.
pub trait I2cMaster {
    /// Error type for bus operations
    type Error: core::fmt::Debug;

    /// Handle to a device attached to this bus
    type Device;

    /// Configure and open the bus
    fn open(&mut self, config: &I2cBusConfig) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges the given 7-bit address
    fn probe(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Attach a device at the configured address and clock speed
    fn attach(&mut self, config: &I2cDeviceConfig) -> Result<Self::Device, Self::Error>;

    /// Transmit bytes to an attached device
    ///
    /// Blocks until the transfer completes; there is no timeout.
    fn transmit(&mut self, device: &Self::Device, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Release a device handle
    fn detach(&mut self, device: Self::Device) -> Result<(), Self::Error>;

    /// Release the bus
    fn close(&mut self) -> Result<(), Self::Error>;
}

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Overrun
    Overrun,
    /// Bus not open or device not attached
    NotReady,
    /// Other error
    Other,
}

impl From<embedded_hal::i2c::ErrorKind> for I2cError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;

        match kind {
            ErrorKind::Bus => I2cError::Bus,
            ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cError::Nack,
            ErrorKind::Overrun => I2cError::Overrun,
            _ => I2cError::Other,
        }
    }
}

/// Source clock for the bus peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Platform default clock
    #[default]
    Default,
    /// Crystal oscillator
    Xtal,
    /// Internal RC oscillator
    RcFast,
}

/// Bus port selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// Let the driver pick a free port
    #[default]
    Auto,
    /// Use a specific port number
    Num(u8),
}

/// Bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cBusConfig {
    /// Source clock
    pub clock_source: ClockSource,
    /// Port selector
    pub port: Port,
    /// Clock (SCL) pin number
    pub scl_pin: u8,
    /// Data (SDA) pin number
    pub sda_pin: u8,
    /// Glitch filter: pulses shorter than this many clock cycles are ignored
    pub glitch_ignore_count: u8,
    /// Interrupt priority (0 lets the driver choose)
    pub interrupt_priority: u8,
    /// Enable internal pull-ups on SCL and SDA
    pub internal_pullup: bool,
    /// Transfer queue depth (0 means synchronous transfers)
    pub queue_depth: usize,
}

impl Default for I2cBusConfig {
    fn default() -> Self {
        Self {
            clock_source: ClockSource::Default,
            port: Port::Auto,
            scl_pin: 22,
            sda_pin: 21,
            glitch_ignore_count: 7,
            interrupt_priority: 0,
            internal_pullup: true,
            queue_depth: 0,
        }
    }
}

impl I2cBusConfig {
    /// Default configuration on the given pins
    pub fn with_pins(scl_pin: u8, sda_pin: u8) -> Self {
        Self {
            scl_pin,
            sda_pin,
            ..Self::default()
        }
    }
}

/// Device address width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressLength {
    /// 7-bit addressing
    #[default]
    SevenBit,
    /// 10-bit addressing
    TenBit,
}

/// Device attach configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cDeviceConfig {
    /// Address width
    pub address_length: AddressLength,
    /// Device address
    pub address: u16,
    /// SCL frequency in Hz
    pub scl_speed_hz: u32,
    /// Clock-stretch wait in microseconds (0 uses the driver default)
    pub scl_wait_us: u32,
}

impl Default for I2cDeviceConfig {
    fn default() -> Self {
        Self::fast(0x3C)
    }
}

impl I2cDeviceConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD_HZ: u32 = 100_000;

    /// Fast mode (400 kHz)
    pub const FAST_HZ: u32 = 400_000;

    /// 7-bit device in fast mode
    pub const fn fast(address: u8) -> Self {
        Self {
            address_length: AddressLength::SevenBit,
            address: address as u16,
            scl_speed_hz: Self::FAST_HZ,
            scl_wait_us: 0,
        }
    }
}
