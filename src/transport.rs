//! Register-addressed block transfers over I2C.

use embedded_hal::i2c::I2c;

use crate::constants::{Register, REGISTER_WIDTH};
use crate::{Error, Result};

/// A bus that can move whole registers to and from a device.
///
/// The device sees a pointer byte selecting `register`, followed by the data.
pub trait RegisterBus {
    type BusError: core::fmt::Debug;

    fn read_block(
        &mut self,
        device: u8,
        register: Register,
        buf: &mut [u8],
    ) -> Result<(), Self::BusError>;

    fn write_block(
        &mut self,
        device: u8,
        register: Register,
        data: &[u8],
    ) -> Result<(), Self::BusError>;
}

impl<I: I2c> RegisterBus for I {
    type BusError = I::Error;

    fn read_block(
        &mut self,
        device: u8,
        register: Register,
        buf: &mut [u8],
    ) -> Result<(), Self::BusError> {
        if buf.len() > REGISTER_WIDTH {
            return Err(Error::BlockLength(buf.len()));
        }

        self.write_read(device, &[register as u8], buf)
            .map_err(Error::Bus)?;

        log::trace!("read {:?} from {:#04x}: {:02x?}", register, device, buf);
        Ok(())
    }

    fn write_block(
        &mut self,
        device: u8,
        register: Register,
        data: &[u8],
    ) -> Result<(), Self::BusError> {
        if data.len() > REGISTER_WIDTH {
            return Err(Error::BlockLength(data.len()));
        }

        let mut transaction = [0u8; REGISTER_WIDTH + 1];
        transaction[0] = register as u8;
        transaction[1..=data.len()].copy_from_slice(data);

        log::trace!("write {:?} to {:#04x}: {:02x?}", register, device, data);
        self.write(device, &transaction[..=data.len()])
            .map_err(Error::Bus)
    }
}
