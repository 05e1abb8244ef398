//! Bus faults surface as transport errors, never as values

use crate::common::*;
use ads1015_rail_monitor::{DeviceConfig, Error, Register, RegisterBus};
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

fn nack() -> ErrorKind {
    ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
}

#[test]
fn test_absent_device_on_sample_read() {
    let expectations = [read_register(CONVERSION, [0x00, 0x00]).with_error(nack())];
    let (mut adc, mut i2c) = driver(&expectations);

    match adc.read_voltage() {
        Err(Error::Bus(kind)) => assert_eq!(kind, nack()),
        other => panic!("expected bus error, got {:?}", other),
    }

    i2c.done();
}

#[test]
fn test_config_write_failure_skips_read_back() {
    let expectations = [
        write_register(CONFIG, DeviceConfig::rail_monitor().encode().to_bytes())
            .with_error(ErrorKind::ArbitrationLoss),
    ];
    let (mut adc, mut i2c) = driver(&expectations);

    assert!(matches!(
        adc.apply_config(DeviceConfig::rail_monitor()),
        Err(Error::Bus(ErrorKind::ArbitrationLoss))
    ));
    assert_eq!(*adc.config(), DeviceConfig::default());

    i2c.done();
}

#[test]
fn test_read_back_failure() {
    let expectations = [
        write_register(CONFIG, [0x42, 0x83]),
        read_register(CONFIG, [0x00, 0x00]).with_error(ErrorKind::Bus),
    ];
    let (mut adc, mut i2c) = driver(&expectations);

    assert!(matches!(
        adc.apply_config(DeviceConfig::rail_monitor()),
        Err(Error::Bus(ErrorKind::Bus))
    ));

    i2c.done();
}

#[test]
fn test_oversized_blocks_are_rejected_before_bus_traffic() {
    let mut i2c = I2cMock::new(&[]);

    assert!(matches!(
        i2c.write_block(ADDR, Register::Config, &[0x42, 0x83, 0x00]),
        Err(Error::BlockLength(3))
    ));

    let mut buf = [0u8; 4];
    assert!(matches!(
        i2c.read_block(ADDR, Register::Conversion, &mut buf),
        Err(Error::BlockLength(4))
    ));

    i2c.done();
}

#[test]
fn test_short_blocks_use_the_register_pointer() {
    let expectations = [
        Transaction::write(ADDR, vec![0x01, 0x42]),
        Transaction::write_read(ADDR, vec![0x00], vec![0x7F]),
    ];
    let mut i2c = I2cMock::new(&expectations);

    i2c.write_block(ADDR, Register::Config, &[0x42]).unwrap();
    let mut buf = [0u8; 1];
    i2c.read_block(ADDR, Register::Conversion, &mut buf).unwrap();
    assert_eq!(buf, [0x7F]);

    i2c.done();
}

#[test]
fn test_error_messages() {
    let err: Error<ErrorKind> = Error::ConfigVerification {
        written: 0x4283,
        read: 0x8583,
    };
    assert_eq!(
        err.to_string(),
        "config verification failed: wrote 0x4283, read back 0x8583"
    );
    assert_eq!(
        Error::<ErrorKind>::BlockLength(3).to_string(),
        "block of 3 bytes exceeds the register width"
    );
}
