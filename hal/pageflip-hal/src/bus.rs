//! `embedded-hal` bus adapter
//!
//! Wraps any blocking `embedded-hal` 1.0 I2C bus as an [`I2cMaster`].
//! Pin muxing and clock setup belong to the wrapped driver, so `open`
//! only records that the bus is usable.

use embedded_hal::i2c::{Error as _, I2c};

use crate::i2c::{AddressLength, I2cBusConfig, I2cDeviceConfig, I2cError, I2cMaster};

/// Handle to a device attached through [`EmbeddedHalBus`]
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttachedDevice {
    address: u8,
}

impl AttachedDevice {
    /// 7-bit address of the device
    pub fn address(&self) -> u8 {
        self.address
    }
}

/// [`I2cMaster`] over an `embedded-hal` blocking bus
pub struct EmbeddedHalBus<I> {
    i2c: I,
    probe_payload: &'static [u8],
    open: bool,
    attached: usize,
}

impl<I: I2c> EmbeddedHalBus<I> {
    /// Wrap a bus; probes are zero-length writes
    pub fn new(i2c: I) -> Self {
        Self::with_probe_payload(i2c, &[])
    }

    /// Wrap a bus whose driver rejects zero-length writes
    ///
    /// `payload` is written to the probed address and must be harmless
    /// for the device (e.g. a NOP command).
    pub fn with_probe_payload(i2c: I, probe_payload: &'static [u8]) -> Self {
        Self {
            i2c,
            probe_payload,
            open: false,
            attached: 0,
        }
    }

    /// Whether the bus has been opened and not yet closed
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of devices currently attached
    pub fn attached(&self) -> usize {
        self.attached
    }

    /// Give back the wrapped bus
    pub fn release(self) -> I {
        self.i2c
    }

    fn ensure_open(&self) -> Result<(), I2cError> {
        if self.open {
            Ok(())
        } else {
            Err(I2cError::NotReady)
        }
    }
}

impl<I: I2c> I2cMaster for EmbeddedHalBus<I> {
    type Error = I2cError;
    type Device = AttachedDevice;

    fn open(&mut self, config: &I2cBusConfig) -> Result<(), Self::Error> {
        if self.open {
            return Err(I2cError::Other);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "I2C bus open (scl: {}, sda: {}, pull-up: {})",
            config.scl_pin,
            config.sda_pin,
            config.internal_pullup
        );
        #[cfg(not(feature = "defmt"))]
        let _ = config;

        self.open = true;
        Ok(())
    }

    fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        self.ensure_open()?;
        self.i2c
            .write(address, self.probe_payload)
            .map_err(|e| I2cError::from(e.kind()))
    }

    fn attach(&mut self, config: &I2cDeviceConfig) -> Result<Self::Device, Self::Error> {
        self.ensure_open()?;

        // embedded-hal buses here are driven in 7-bit mode only
        if config.address_length != AddressLength::SevenBit || config.address > 0x7F {
            return Err(I2cError::Other);
        }

        self.attached += 1;
        Ok(AttachedDevice {
            address: config.address as u8,
        })
    }

    fn transmit(&mut self, device: &Self::Device, bytes: &[u8]) -> Result<(), Self::Error> {
        self.ensure_open()?;
        self.i2c
            .write(device.address, bytes)
            .map_err(|e| I2cError::from(e.kind()))
    }

    fn detach(&mut self, device: Self::Device) -> Result<(), Self::Error> {
        let _ = device;
        if self.attached == 0 {
            return Err(I2cError::NotReady);
        }
        self.attached -= 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.ensure_open()?;
        // A bus with devices still attached cannot be released
        if self.attached != 0 {
            return Err(I2cError::Other);
        }
        self.open = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    fn test_probe_requires_open_bus() {
        let mut mock = I2cMock::new(&[]);
        let mut bus = EmbeddedHalBus::new(mock.clone());

        assert_eq!(bus.probe(0x3C), Err(I2cError::NotReady));

        mock.done();
    }

    #[test]
    fn test_probe_ack_and_nack() {
        let expectations = [
            Transaction::write(0x3C, vec![]),
            Transaction::write(0x3D, vec![])
                .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
        ];
        let mut mock = I2cMock::new(&expectations);
        let mut bus = EmbeddedHalBus::new(mock.clone());

        bus.open(&I2cBusConfig::default()).unwrap();
        assert_eq!(bus.probe(0x3C), Ok(()));
        assert_eq!(bus.probe(0x3D), Err(I2cError::Nack));

        mock.done();
    }

    #[test]
    fn test_probe_payload_is_written() {
        let expectations = [Transaction::write(0x3C, vec![0x00, 0xE3])];
        let mut mock = I2cMock::new(&expectations);
        let mut bus = EmbeddedHalBus::with_probe_payload(mock.clone(), &[0x00, 0xE3]);

        bus.open(&I2cBusConfig::default()).unwrap();
        assert_eq!(bus.probe(0x3C), Ok(()));

        mock.done();
    }

    #[test]
    fn test_attach_transmit_detach_close() {
        let expectations = [Transaction::write(0x3C, vec![0x40, 0xFF, 0x01])];
        let mut mock = I2cMock::new(&expectations);
        let mut bus = EmbeddedHalBus::new(mock.clone());

        bus.open(&I2cBusConfig::default()).unwrap();
        let device = bus.attach(&I2cDeviceConfig::fast(0x3C)).unwrap();
        assert_eq!(device.address(), 0x3C);
        assert_eq!(bus.attached(), 1);

        bus.transmit(&device, &[0x40, 0xFF, 0x01]).unwrap();

        // Bus stays busy while a device is attached
        assert_eq!(bus.close(), Err(I2cError::Other));

        bus.detach(device).unwrap();
        assert_eq!(bus.close(), Ok(()));
        assert!(!bus.is_open());

        mock.done();
    }

    #[test]
    fn test_attach_rejects_ten_bit_address() {
        let mut mock = I2cMock::new(&[]);
        let mut bus = EmbeddedHalBus::new(mock.clone());
        bus.open(&I2cBusConfig::default()).unwrap();

        let config = I2cDeviceConfig {
            address_length: AddressLength::TenBit,
            address: 0x13C,
            ..I2cDeviceConfig::default()
        };
        assert_eq!(bus.attach(&config), Err(I2cError::Other));

        mock.done();
    }

    #[test]
    fn test_bus_error_kinds_are_mapped() {
        let expectations = [
            Transaction::write(0x3C, vec![0x00]).with_error(ErrorKind::ArbitrationLoss),
            Transaction::write(0x3C, vec![0x00]).with_error(ErrorKind::Bus),
        ];
        let mut mock = I2cMock::new(&expectations);
        let mut bus = EmbeddedHalBus::new(mock.clone());
        bus.open(&I2cBusConfig::default()).unwrap();
        let device = bus.attach(&I2cDeviceConfig::default()).unwrap();

        assert_eq!(
            bus.transmit(&device, &[0x00]),
            Err(I2cError::ArbitrationLost)
        );
        assert_eq!(bus.transmit(&device, &[0x00]), Err(I2cError::Bus));

        bus.detach(device).unwrap();
        mock.done();
    }

    #[test]
    fn test_default_bus_config() {
        let config = I2cBusConfig::default();
        assert_eq!(config.glitch_ignore_count, 7);
        assert!(config.internal_pullup);
        assert_eq!(config.queue_depth, 0);

        let config = I2cBusConfig::with_pins(5, 4);
        assert_eq!((config.scl_pin, config.sda_pin), (5, 4));
        assert_eq!(config.glitch_ignore_count, 7);
    }
}
