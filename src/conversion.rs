//! Conversion-register decoding and voltage divider correction.

use byteorder::ByteOrder as _;

use crate::constants::REGISTER_WIDTH;

/// Padding bits below the left-justified 12-bit result.
const PADDING_BITS: u32 = 4;
const RESULT_BITS: u32 = 12;
const SIGN_BIT: i16 = 1 << (RESULT_BITS - 1);
const MODULUS: i16 = 1 << RESULT_BITS;

/// Signed conversion count in `[-2048, 2047]`.
pub fn decode_counts(raw: [u8; REGISTER_WIDTH]) -> i16 {
    let magnitude = (byteorder::BigEndian::read_u16(&raw) >> PADDING_BITS) as i16;

    if magnitude & SIGN_BIT != 0 {
        magnitude - MODULUS
    } else {
        magnitude
    }
}

/// Left-justified register bytes for a signed 12-bit count.
///
/// Counts outside the 12-bit range are clamped to the nearest code.
pub fn encode_counts(counts: i16) -> [u8; REGISTER_WIDTH] {
    let clamped = counts.clamp(-SIGN_BIT, SIGN_BIT - 1);
    let mut buf = [0u8; REGISTER_WIDTH];
    byteorder::BigEndian::write_i16(&mut buf, clamped << PADDING_BITS);
    buf
}

pub fn counts_to_volts(counts: i16, lsb_volts: f32) -> f32 {
    f32::from(counts) * lsb_volts
}

/// Voltage at the converter input for a raw conversion register read.
pub fn decode(raw: [u8; REGISTER_WIDTH], lsb_volts: f32) -> f32 {
    counts_to_volts(decode_counts(raw), lsb_volts)
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("divider ratio must be finite and positive, got {0}")]
pub struct DividerError(pub f32);

/// Factor between the rail and the divider tap, `(R1 + R2) / R2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerRatio(f32);

impl DividerRatio {
    pub fn new(ratio: f32) -> Result<Self, DividerError> {
        if ratio.is_finite() && ratio > 0.0 {
            Ok(Self(ratio))
        } else {
            Err(DividerError(ratio))
        }
    }

    pub fn from_resistors(r_top: f32, r_bottom: f32) -> Result<Self, DividerError> {
        Self::new((r_top + r_bottom) / r_bottom)
    }

    pub const fn get(self) -> f32 {
        self.0
    }

    pub fn correct(self, measured: f32) -> f32 {
        measured * self.0
    }
}

pub fn correct(measured: f32, ratio: DividerRatio) -> f32 {
    ratio.correct(measured)
}
