//! Deployment settings.
//!
//! Defaults are compiled in from `cfg.toml` (see `cfg.toml.example`); any
//! field can be overridden at runtime with a `RAIL_MONITOR_<FIELD>`
//! environment variable.

use std::str::FromStr;
use std::time::Duration;

use crate::conversion::{DividerError, DividerRatio};

#[toml_cfg::toml_config]
pub struct Config {
    #[default(1)]
    i2c_bus: u8,

    #[default(0x49)]
    device_address: u8,

    #[default("mqtt")]
    broker_host: &'static str,

    #[default(1883)]
    broker_port: u16,

    #[default("ads1015-rail-monitor")]
    client_id: &'static str,

    #[default("network_telemetry/lab/voltage")]
    telemetry_topic: &'static str,

    // R1 = 10k, R2 = 2.2k: nominal 12 V rail reads 2.164 V at the ADC
    #[default(5.545)]
    divider_ratio: f32,

    #[default(60)]
    poll_interval_seconds: u64,

    #[default(true)]
    discovery_enabled: bool,

    #[default("homeassistant/sensor/dc_rail_voltage/config")]
    discovery_topic: &'static str,

    #[default("DC Rail Voltage")]
    discovery_name: &'static str,

    #[default("dc_rail_voltage")]
    discovery_unique_id: &'static str,
}

const ENV_PREFIX: &str = "RAIL_MONITOR_";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{key}: cannot parse {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("device address {0:#04x} is not a 7-bit address")]
    InvalidDeviceAddress(u8),
    #[error(transparent)]
    InvalidDividerRatio(#[from] DividerError),
    #[error("poll interval must be at least one second")]
    ZeroInterval,
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverySettings {
    pub topic: String,
    pub name: String,
    pub unique_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub i2c_bus: u8,
    pub device_address: u8,
    pub broker_host: String,
    pub broker_port: u16,
    pub client_id: String,
    pub telemetry_topic: String,
    pub divider_ratio: DividerRatio,
    pub poll_interval: Duration,
    /// `None` when discovery is disabled.
    pub discovery: Option<DiscoverySettings>,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from the compiled defaults, taking overrides from
    /// `lookup` (keyed by the full environment variable name).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = CONFIG;
        let overrides = Overrides(lookup);

        let i2c_bus = overrides.parse("I2C_BUS", config.i2c_bus)?;
        let device_address = parse_device_address(overrides.parse_address(config.device_address)?)?;
        let broker_host = overrides.string("BROKER_HOST", config.broker_host);
        let broker_port = overrides.parse("BROKER_PORT", config.broker_port)?;
        let client_id = overrides.string("CLIENT_ID", config.client_id);
        let telemetry_topic = overrides.string("TELEMETRY_TOPIC", config.telemetry_topic);
        let divider_ratio = DividerRatio::new(overrides.parse("DIVIDER_RATIO", config.divider_ratio)?)?;
        let poll_interval_seconds =
            overrides.parse("POLL_INTERVAL_SECONDS", config.poll_interval_seconds)?;
        let discovery_enabled = overrides.parse("DISCOVERY_ENABLED", config.discovery_enabled)?;

        require("broker_host", &broker_host)?;
        require("client_id", &client_id)?;
        require("telemetry_topic", &telemetry_topic)?;

        if poll_interval_seconds == 0 {
            return Err(SettingsError::ZeroInterval);
        }

        let discovery = if discovery_enabled {
            let discovery = DiscoverySettings {
                topic: overrides.string("DISCOVERY_TOPIC", config.discovery_topic),
                name: overrides.string("DISCOVERY_NAME", config.discovery_name),
                unique_id: overrides.string("DISCOVERY_UNIQUE_ID", config.discovery_unique_id),
            };
            require("discovery_topic", &discovery.topic)?;
            require("discovery_unique_id", &discovery.unique_id)?;
            Some(discovery)
        } else {
            None
        };

        Ok(Settings {
            i2c_bus,
            device_address,
            broker_host,
            broker_port,
            client_id,
            telemetry_topic,
            divider_ratio,
            poll_interval: Duration::from_secs(poll_interval_seconds),
            discovery,
        })
    }

    pub fn i2c_path(&self) -> String {
        format!("/dev/i2c-{}", self.i2c_bus)
    }
}

struct Overrides<F>(F);

impl<F: Fn(&str) -> Option<String>> Overrides<F> {
    fn raw(&self, field: &str) -> Option<(String, String)> {
        let key = format!("{ENV_PREFIX}{field}");
        (self.0)(&key).map(|value| (key, value))
    }

    fn string(&self, field: &str, default: &str) -> String {
        self.raw(field)
            .map(|(_, value)| value)
            .unwrap_or_else(|| default.to_string())
    }

    fn parse<T: FromStr>(&self, field: &str, default: T) -> Result<T, SettingsError> {
        match self.raw(field) {
            Some((key, value)) => value
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidValue { key, value }),
            None => Ok(default),
        }
    }

    // Addresses are usually written in hex, so accept a 0x prefix.
    fn parse_address(&self, default: u8) -> Result<u8, SettingsError> {
        match self.raw("DEVICE_ADDRESS") {
            Some((key, value)) => {
                let trimmed = value.trim();
                let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
                    Some(hex) => u8::from_str_radix(hex, 16),
                    None => trimmed.parse(),
                };
                parsed.map_err(|_| SettingsError::InvalidValue { key, value })
            }
            None => Ok(default),
        }
    }
}

pub fn parse_device_address(address: u8) -> Result<u8, SettingsError> {
    if address <= 0x7F {
        Ok(address)
    } else {
        Err(SettingsError::InvalidDeviceAddress(address))
    }
}

fn require(name: &'static str, value: &str) -> Result<(), SettingsError> {
    if value.trim().is_empty() {
        Err(SettingsError::Empty(name))
    } else {
        Ok(())
    }
}
