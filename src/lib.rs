#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! Driver for the TI ADS1015 12-bit I2C ADC, and a rail voltage monitor built
//! on it that publishes readings over MQTT.

pub mod config;
pub mod constants;
pub mod conversion;
pub mod transport;

#[cfg(feature = "std")]
pub mod monitor;
#[cfg(feature = "std")]
pub mod settings;
#[cfg(feature = "std")]
pub mod tracing;

pub use config::{ComparatorSettings, ConfigWord, DeviceConfig};
pub use constants::*;
pub use conversion::{correct, decode, decode_counts, DividerError, DividerRatio};
pub use transport::RegisterBus;

pub type Result<T, E> = core::result::Result<T, Error<E>>;

#[derive(Debug, thiserror::Error)]
pub enum Error<E: core::fmt::Debug> {
    #[error("bus transfer failed: {0:?}")]
    Bus(E),
    #[error("block of {0} bytes exceeds the register width")]
    BlockLength(usize),
    #[error("config verification failed: wrote {written:#06x}, read back {read:#06x}")]
    ConfigVerification { written: u16, read: u16 },
}

pub struct Ads1015<B: RegisterBus> {
    bus: B,
    address: u8,
    config: DeviceConfig,
}

impl<B: RegisterBus> Ads1015<B> {
    /// Wraps the bus without touching the device. Until a config is applied
    /// the driver assumes the power-on defaults.
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            config: DeviceConfig::default(),
        }
    }

    /// Applies `config` and verifies it by reading it back.
    pub fn new_with_config(bus: B, address: u8, config: DeviceConfig) -> Result<Self, B::BusError> {
        let mut adc = Self::new(bus, address);
        adc.apply_config(config)?;
        Ok(adc)
    }

    pub fn destroy(self) -> B {
        let Self { bus, .. } = self;
        bus
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// The configuration the driver last applied and verified.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn apply_config(&mut self, config: DeviceConfig) -> Result<(), B::BusError> {
        let written = config.encode();
        self.set_register(Register::Config, written.to_bytes())?;

        let read = ConfigWord::from_bytes(self.get_register(Register::Config)?);
        if !written.matches(read) {
            log::error!(
                "config mismatch at {:#04x}: wrote {:#06x}, read {:#06x}",
                self.address,
                written.bits(),
                read.bits()
            );
            return Err(Error::ConfigVerification {
                written: written.bits(),
                read: read.bits(),
            });
        }

        log::info!("config {:#06x} applied: {:?}", written.bits(), config);
        self.config = config;
        Ok(())
    }

    pub fn read_config_word(&mut self) -> Result<ConfigWord, B::BusError> {
        self.get_register(Register::Config).map(ConfigWord::from_bytes)
    }

    pub fn read_config(&mut self) -> Result<DeviceConfig, B::BusError> {
        self.read_config_word().map(ConfigWord::decode)
    }

    /// Latest conversion register contents.
    pub fn read_raw(&mut self) -> Result<[u8; REGISTER_WIDTH], B::BusError> {
        self.get_register(Register::Conversion)
    }

    pub fn read_counts(&mut self) -> Result<i16, B::BusError> {
        self.read_raw().map(decode_counts)
    }

    /// Input voltage, scaled by the LSB weight of the applied range.
    pub fn read_voltage(&mut self) -> Result<f32, B::BusError> {
        let raw = self.read_raw()?;
        let volts = decode(raw, self.config.lsb_volts());
        log::debug!("conversion {:02x?} -> {} V", raw, volts);
        Ok(volts)
    }

    /// Writes the comparator thresholds as 12-bit counts.
    pub fn set_thresholds(&mut self, low: i16, high: i16) -> Result<(), B::BusError> {
        self.set_register(Register::LoThresh, conversion::encode_counts(low))?;
        self.set_register(Register::HiThresh, conversion::encode_counts(high))
    }

    pub fn read_thresholds(&mut self) -> Result<(i16, i16), B::BusError> {
        let low = decode_counts(self.get_register(Register::LoThresh)?);
        let high = decode_counts(self.get_register(Register::HiThresh)?);
        Ok((low, high))
    }

    fn set_register(&mut self, reg: Register, val: [u8; REGISTER_WIDTH]) -> Result<(), B::BusError> {
        self.bus.write_block(self.address, reg, &val)
    }

    fn get_register(&mut self, reg: Register) -> Result<[u8; REGISTER_WIDTH], B::BusError> {
        let mut val = [0u8; REGISTER_WIDTH];
        self.bus.read_block(self.address, reg, &mut val)?;
        Ok(val)
    }
}
