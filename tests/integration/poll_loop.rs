//! Integration tests for the configure / sample / publish cycle

use crate::common::*;
use ads1015_rail_monitor::monitor::{
    Discovery, DiscoveryConfig, MonitorError, MonitorState, RailMonitor,
};
use ads1015_rail_monitor::{Ads1015, DeviceConfig, DividerRatio, Error};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

const TOPIC: &str = "network_telemetry/lab/voltage";
const DISCOVERY_TOPIC: &str = "homeassistant/sensor/dc_rail_voltage/config";

fn startup() -> Vec<Transaction> {
    let mut expectations = vec![read_register(CONFIG, reset_bytes())];
    expectations.extend(apply_rail_config());
    expectations
}

fn discovery() -> Discovery {
    Discovery {
        topic: DISCOVERY_TOPIC.to_string(),
        config: DiscoveryConfig::voltage("DC Rail Voltage", "dc_rail_voltage", TOPIC),
    }
}

fn monitor(
    expectations: &[Transaction],
    publisher: RecordingPublisher,
) -> (RailMonitor<I2cMock, RecordingPublisher>, I2cMock) {
    let i2c = I2cMock::new(expectations);
    let handle = i2c.clone();
    let adc = Ads1015::new(i2c, ADDR);
    let ratio = DividerRatio::new(5.545).unwrap();
    (RailMonitor::new(adc, publisher, ratio, TOPIC), handle)
}

#[test]
fn test_end_to_end_cycle() {
    let mut expectations = startup();
    expectations.push(read_register(CONVERSION, [0x08, 0x00]));
    let (monitor, mut i2c) = monitor(&expectations, RecordingPublisher::default());
    let mut monitor = monitor.with_discovery(discovery());

    assert_eq!(monitor.state(), MonitorState::Init);
    monitor.configure(DeviceConfig::rail_monitor()).unwrap();
    assert_eq!(monitor.state(), MonitorState::Configured);

    // 128 counts * 2 mV * 5.545 = 1.41952 V
    assert_eq!(monitor.poll_once().unwrap(), 1.42);

    let (_, publisher) = monitor.into_parts();
    assert_eq!(publisher.messages.len(), 2);
    assert_eq!(publisher.messages[0].0, DISCOVERY_TOPIC);
    assert_eq!(publisher.payloads_for(TOPIC), vec!["1.42"]);

    let announced: serde_json::Value = serde_json::from_str(&publisher.messages[0].1).unwrap();
    assert_eq!(announced["device_class"], "voltage");
    assert_eq!(announced["unique_id"], "dc_rail_voltage");
    assert_eq!(announced["state_topic"], TOPIC);

    i2c.done();
}

#[test]
fn test_no_discovery_when_disabled() {
    let mut expectations = startup();
    expectations.push(read_register(CONVERSION, [0x00, 0x00]));
    let (mut monitor, mut i2c) = monitor(&expectations, RecordingPublisher::default());

    monitor.configure(DeviceConfig::rail_monitor()).unwrap();
    assert_eq!(monitor.poll_once().unwrap(), 0.0);

    let (_, publisher) = monitor.into_parts();
    assert_eq!(publisher.messages, vec![(TOPIC.to_string(), "0".to_string())]);

    i2c.done();
}

#[test]
fn test_sampling_requires_configuration() {
    let (mut monitor, mut i2c) = monitor(&[], RecordingPublisher::default());

    assert!(matches!(monitor.poll_once(), Err(MonitorError::NotConfigured)));

    let (_, publisher) = monitor.into_parts();
    assert!(publisher.messages.is_empty());

    i2c.done();
}

#[test]
fn test_verification_failure_stops_before_sampling() {
    let expectations = [
        read_register(CONFIG, reset_bytes()),
        write_register(CONFIG, [0x42, 0x83]),
        read_register(CONFIG, reset_bytes()),
    ];
    let (monitor, mut i2c) = monitor(&expectations, RecordingPublisher::default());
    let mut monitor = monitor.with_discovery(discovery());

    assert!(matches!(
        monitor.configure(DeviceConfig::rail_monitor()),
        Err(MonitorError::Device(Error::ConfigVerification { .. }))
    ));
    assert_eq!(monitor.state(), MonitorState::Init);
    assert!(matches!(monitor.poll_once(), Err(MonitorError::NotConfigured)));

    let (_, publisher) = monitor.into_parts();
    assert!(publisher.messages.is_empty(), "nothing may be announced or published");

    i2c.done();
}

#[test]
fn test_bus_fault_publishes_nothing() {
    let mut expectations = startup();
    expectations.push(read_register(CONVERSION, [0x00, 0x00]).with_error(ErrorKind::Bus));
    let (mut monitor, mut i2c) = monitor(&expectations, RecordingPublisher::default());

    monitor.configure(DeviceConfig::rail_monitor()).unwrap();
    assert!(matches!(
        monitor.poll_once(),
        Err(MonitorError::Device(Error::Bus(ErrorKind::Bus)))
    ));

    let (_, publisher) = monitor.into_parts();
    assert!(publisher.payloads_for(TOPIC).is_empty());

    i2c.done();
}

#[test]
fn test_run_loops_until_publish_fails() {
    let mut expectations = startup();
    let samples = [[0x08, 0x00], [0x10, 0x00], [0x00, 0x00], [0xFF, 0xF0]];
    for raw in samples {
        expectations.push(read_register(CONVERSION, raw));
    }
    let (mut monitor, mut i2c) = monitor(&expectations, RecordingPublisher::failing_after(3));
    let mut ticker = CountingTicker::default();

    monitor.configure(DeviceConfig::rail_monitor()).unwrap();
    let err = match monitor.run(&mut ticker) {
        Ok(never) => match never {},
        Err(err) => err,
    };

    assert!(matches!(err, MonitorError::Publish(_)));
    assert_eq!(ticker.ticks, 3);

    let (_, publisher) = monitor.into_parts();
    // 256 counts -> 0.512 V -> 2.83904 V
    assert_eq!(publisher.payloads_for(TOPIC), vec!["1.42", "2.839", "0"]);

    i2c.done();
}

#[test]
fn test_discovery_publish_failure_is_propagated() {
    let (monitor, mut i2c) = monitor(&startup(), RecordingPublisher::failing_after(0));
    let mut monitor = monitor.with_discovery(discovery());

    assert!(matches!(
        monitor.configure(DeviceConfig::rail_monitor()),
        Err(MonitorError::Publish(_))
    ));

    i2c.done();
}
