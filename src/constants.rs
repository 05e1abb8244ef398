/// Address pointer values of the ADS1015 registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Conversion = 0x00,
    Config = 0x01,
    LoThresh = 0x02,
    HiThresh = 0x03,
}

/// Every register on the device is 16 bits wide, sent MSB first.
pub const REGISTER_WIDTH: usize = 2;

/// Default 7-bit bus address used by the rail monitor board (ADDR tied to VDD).
pub const DEFAULT_ADDRESS: u8 = 0x49;

// CONFIG register bitmasks, high byte
pub const OS_MASK: u16 = 0b1000_0000 << 8;
pub const MUX_MASK: u16 = 0b0111_0000 << 8;
pub const PGA_MASK: u16 = 0b0000_1110 << 8;
pub const MODE_MASK: u16 = 0b0000_0001 << 8;
// CONFIG register bitmasks, low byte
pub const DR_MASK: u16 = 0b1110_0000;
pub const COMP_MODE_MASK: u16 = 0b0001_0000;
pub const COMP_POL_MASK: u16 = 0b0000_1000;
pub const COMP_LAT_MASK: u16 = 0b0000_0100;
pub const COMP_QUE_MASK: u16 = 0b0000_0011;

/// A sub-field of the CONFIG register, located by its mask.
///
/// The shift is derived from the mask so the two can never disagree.
pub trait ConfigField: Copy {
    const MASK: u16;
    const SHIFT: u32 = Self::MASK.trailing_zeros();

    fn bits(self) -> u16;
    fn from_bits(bits: u16) -> Self;
}

macro_rules! impl_config_field {
    ($type:ident, $mask:ident, { $($bits:literal => $variant:ident),* $(,)? }) => {
        impl ConfigField for $type {
            const MASK: u16 = $mask;

            fn bits(self) -> u16 {
                self as u16
            }

            fn from_bits(bits: u16) -> Self {
                match bits {
                    $($bits => $type::$variant,)*
                    _ => unreachable!("field value wider than its mask"),
                }
            }
        }
    };
}

/// Start a single conversion (write) / conversion idle (read).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OperationalStatus {
    NoEffect = 0,
    StartConversion = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InputMux {
    Ain0Ain1 = 0b000,
    Ain0Ain3 = 0b001,
    Ain1Ain3 = 0b010,
    Ain2Ain3 = 0b011,
    Ain0Gnd = 0b100,
    Ain1Gnd = 0b101,
    Ain2Gnd = 0b110,
    Ain3Gnd = 0b111,
}

/// Programmable gain amplifier setting, named by full-scale range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FullScaleRange {
    Fs6v144 = 0b000,
    Fs4v096 = 0b001,
    Fs2v048 = 0b010,
    Fs1v024 = 0b011,
    Fs0v512 = 0b100,
    Fs0v256 = 0b101,
}

impl FullScaleRange {
    /// Volts represented by one count of the 12-bit conversion result.
    ///
    /// FSR / 2^11, as tabulated in the datasheet.
    pub const fn lsb_volts(self) -> f32 {
        match self {
            Self::Fs6v144 => 0.003,
            Self::Fs4v096 => 0.002,
            Self::Fs2v048 => 0.001,
            Self::Fs1v024 => 0.000_5,
            Self::Fs0v512 => 0.000_25,
            Self::Fs0v256 => 0.000_125,
        }
    }

    pub const fn full_scale_volts(self) -> f32 {
        match self {
            Self::Fs6v144 => 6.144,
            Self::Fs4v096 => 4.096,
            Self::Fs2v048 => 2.048,
            Self::Fs1v024 => 1.024,
            Self::Fs0v512 => 0.512,
            Self::Fs0v256 => 0.256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Continuous = 0,
    SingleShot = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataRate {
    Sps128 = 0b000,
    Sps250 = 0b001,
    Sps490 = 0b010,
    Sps920 = 0b011,
    Sps1600 = 0b100,
    Sps2400 = 0b101,
    Sps3300 = 0b110,
}

impl DataRate {
    pub const fn samples_per_second(self) -> u16 {
        match self {
            Self::Sps128 => 128,
            Self::Sps250 => 250,
            Self::Sps490 => 490,
            Self::Sps920 => 920,
            Self::Sps1600 => 1600,
            Self::Sps2400 => 2400,
            Self::Sps3300 => 3300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ComparatorMode {
    Traditional = 0,
    Window = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ComparatorPolarity {
    ActiveLow = 0,
    ActiveHigh = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ComparatorLatch {
    NonLatching = 0,
    Latching = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ComparatorQueue {
    AfterOne = 0b00,
    AfterTwo = 0b01,
    AfterFour = 0b10,
    Disabled = 0b11,
}

impl_config_field!(OperationalStatus, OS_MASK, { 0 => NoEffect, 1 => StartConversion });

impl_config_field!(InputMux, MUX_MASK, {
    0b000 => Ain0Ain1,
    0b001 => Ain0Ain3,
    0b010 => Ain1Ain3,
    0b011 => Ain2Ain3,
    0b100 => Ain0Gnd,
    0b101 => Ain1Gnd,
    0b110 => Ain2Gnd,
    0b111 => Ain3Gnd,
});

// 0b110 and 0b111 are aliases of the 0.256 V range
impl_config_field!(FullScaleRange, PGA_MASK, {
    0b000 => Fs6v144,
    0b001 => Fs4v096,
    0b010 => Fs2v048,
    0b011 => Fs1v024,
    0b100 => Fs0v512,
    0b101 => Fs0v256,
    0b110 => Fs0v256,
    0b111 => Fs0v256,
});

impl_config_field!(Mode, MODE_MASK, { 0 => Continuous, 1 => SingleShot });

// 0b111 is an alias of 3300 SPS
impl_config_field!(DataRate, DR_MASK, {
    0b000 => Sps128,
    0b001 => Sps250,
    0b010 => Sps490,
    0b011 => Sps920,
    0b100 => Sps1600,
    0b101 => Sps2400,
    0b110 => Sps3300,
    0b111 => Sps3300,
});

impl_config_field!(ComparatorMode, COMP_MODE_MASK, { 0 => Traditional, 1 => Window });
impl_config_field!(ComparatorPolarity, COMP_POL_MASK, { 0 => ActiveLow, 1 => ActiveHigh });
impl_config_field!(ComparatorLatch, COMP_LAT_MASK, { 0 => NonLatching, 1 => Latching });

impl_config_field!(ComparatorQueue, COMP_QUE_MASK, {
    0b00 => AfterOne,
    0b01 => AfterTwo,
    0b10 => AfterFour,
    0b11 => Disabled,
});
