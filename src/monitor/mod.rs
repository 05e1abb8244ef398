//! The rail monitor poll loop.
//!
//! `RailMonitor` owns the converter and the publisher for the life of the
//! process. It moves `Init -> Configured` once, then repeats
//! `Sample -> Publish` on every tick until an error ends the loop. Errors are
//! handed back to the caller untouched; nothing here retries, and a failed
//! cycle never publishes a value.

mod discovery;
mod publish;
mod ticker;

pub use discovery::{Discovery, DiscoveryConfig};
pub use publish::{MqttPublisher, PublishError, Publisher};
pub use ticker::{IntervalTicker, Ticker};

use std::convert::Infallible;

use crate::tracing::prelude::*;
use crate::{Ads1015, DeviceConfig, DividerRatio, RegisterBus};

#[derive(Debug, thiserror::Error)]
pub enum MonitorError<E: std::fmt::Debug + 'static> {
    #[error("ADC: {0}")]
    Device(#[from] crate::Error<E>),
    #[error("publish: {0}")]
    Publish(#[from] PublishError),
    #[error("discovery payload: {0}")]
    Discovery(#[from] serde_json::Error),
    #[error("sampling before the converter was configured")]
    NotConfigured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Init,
    Configured,
}

/// Digits kept in the published value.
pub const DISPLAY_DECIMALS: i32 = 3;

/// Rounds half away from zero to [`DISPLAY_DECIMALS`] places.
pub fn round_for_display(volts: f32) -> f32 {
    let scale = 10f32.powi(DISPLAY_DECIMALS);
    let rounded = (volts * scale).round() / scale;
    // no "-0" on the wire
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub struct RailMonitor<B: RegisterBus, P: Publisher> {
    adc: Ads1015<B>,
    publisher: P,
    ratio: DividerRatio,
    topic: String,
    discovery: Option<Discovery>,
    state: MonitorState,
}

impl<B, P> RailMonitor<B, P>
where
    B: RegisterBus,
    B::BusError: 'static,
    P: Publisher,
{
    pub fn new(adc: Ads1015<B>, publisher: P, ratio: DividerRatio, topic: impl Into<String>) -> Self {
        Self {
            adc,
            publisher,
            ratio,
            topic: topic.into(),
            discovery: None,
            state: MonitorState::Init,
        }
    }

    /// Announce the sensor once, when the converter becomes configured.
    pub fn with_discovery(mut self, discovery: Discovery) -> Self {
        self.discovery = Some(discovery);
        self
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn into_parts(self) -> (Ads1015<B>, P) {
        (self.adc, self.publisher)
    }

    /// Writes and verifies `config`, then sends the discovery announcement.
    pub fn configure(&mut self, config: DeviceConfig) -> Result<(), MonitorError<B::BusError>> {
        let previous = format!("{:#06x}", self.adc.read_config_word()?.bits());
        info!(address = self.adc.address(), config = %previous, "Previous ADC config");

        self.adc.apply_config(config)?;
        self.state = MonitorState::Configured;

        if let Some(discovery) = &self.discovery {
            let payload = discovery.config.to_payload()?;
            self.publisher.publish(&discovery.topic, &payload)?;
            info!(topic = %discovery.topic, "Discovery announced");
        }

        Ok(())
    }

    /// Runs one `Sample -> Publish` cycle and returns the published voltage.
    pub fn poll_once(&mut self) -> Result<f32, MonitorError<B::BusError>> {
        if self.state != MonitorState::Configured {
            return Err(MonitorError::NotConfigured);
        }

        let measured = self.adc.read_voltage()?;
        let rail = round_for_display(self.ratio.correct(measured));
        debug!(measured = measured, rail = rail, "Sampled");

        self.publisher.publish(&self.topic, &rail.to_string())?;
        info!(topic = %self.topic, volts = rail, "Published rail voltage");

        Ok(rail)
    }

    /// Polls forever, waiting on `ticker` between cycles. Only returns with
    /// the first error.
    pub fn run<T: Ticker>(&mut self, ticker: &mut T) -> Result<Infallible, MonitorError<B::BusError>> {
        loop {
            self.poll_once()?;
            ticker.wait();
        }
    }
}
