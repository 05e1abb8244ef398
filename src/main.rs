use anyhow::Context as _;
use linux_embedded_hal::I2cdev;

use ads1015_rail_monitor::monitor::{Discovery, IntervalTicker, MqttPublisher, RailMonitor};
use ads1015_rail_monitor::settings::Settings;
use ads1015_rail_monitor::tracing::prelude::*;
use ads1015_rail_monitor::{Ads1015, DeviceConfig};

fn main() -> anyhow::Result<()> {
    ads1015_rail_monitor::tracing::init_stdout();

    let settings = Settings::load().context("loading settings")?;
    info!(
        bus = %settings.i2c_path(),
        address = settings.device_address,
        broker = %format!("{}:{}", settings.broker_host, settings.broker_port),
        "Starting rail monitor"
    );

    let i2c = I2cdev::new(settings.i2c_path())
        .with_context(|| format!("opening {}", settings.i2c_path()))?;
    let adc = Ads1015::new(i2c, settings.device_address);
    let publisher = MqttPublisher::new(
        settings.broker_host.clone(),
        settings.broker_port,
        settings.client_id.clone(),
    );

    let mut monitor = RailMonitor::new(
        adc,
        publisher,
        settings.divider_ratio,
        settings.telemetry_topic.clone(),
    );
    if let Some(discovery) = &settings.discovery {
        monitor = monitor.with_discovery(Discovery::from_settings(discovery, &settings.telemetry_topic));
    }

    monitor
        .configure(DeviceConfig::rail_monitor())
        .context("configuring ADC")?;

    let mut ticker = IntervalTicker::new(settings.poll_interval);
    info!(interval_secs = ticker.interval().as_secs(), "Polling");
    let err = match monitor.run(&mut ticker) {
        Ok(never) => match never {},
        Err(err) => err,
    };

    error!(error = %err, "Poll loop stopped");
    Err(err).context("polling rail voltage")
}
