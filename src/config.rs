//! Typed view of the 16-bit CONFIG register.
//!
//! Each sub-field is read and written through its [`ConfigField`] mask, so
//! setting one field never disturbs its neighbours in the same byte.

use byteorder::ByteOrder as _;

use crate::constants::*;

/// Raw CONFIG register contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigWord(u16);

impl ConfigWord {
    /// Bits compared when verifying a write. OS reads back as conversion
    /// status, not as the value written.
    pub const VERIFY_MASK: u16 = !OS_MASK;

    /// Power-on reset value from the datasheet.
    pub const RESET: Self = Self(0x8583);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn from_bytes(bytes: [u8; REGISTER_WIDTH]) -> Self {
        Self(byteorder::BigEndian::read_u16(&bytes))
    }

    pub fn to_bytes(self) -> [u8; REGISTER_WIDTH] {
        let mut buf = [0u8; REGISTER_WIDTH];
        byteorder::BigEndian::write_u16(&mut buf, self.0);
        buf
    }

    /// True when every bit except OS matches.
    pub fn matches(self, read_back: Self) -> bool {
        (self.0 ^ read_back.0) & Self::VERIFY_MASK == 0
    }

    pub fn get<F: ConfigField>(self) -> F {
        F::from_bits((self.0 & F::MASK) >> F::SHIFT)
    }

    pub fn set<F: ConfigField>(&mut self, field: F) {
        self.0 = (self.0 & !F::MASK) | ((field.bits() << F::SHIFT) & F::MASK);
    }

    pub fn os(self) -> OperationalStatus {
        self.get()
    }

    pub fn mux(self) -> InputMux {
        self.get()
    }

    pub fn pga(self) -> FullScaleRange {
        self.get()
    }

    pub fn mode(self) -> Mode {
        self.get()
    }

    pub fn data_rate(self) -> DataRate {
        self.get()
    }

    pub fn comp_mode(self) -> ComparatorMode {
        self.get()
    }

    pub fn comp_pol(self) -> ComparatorPolarity {
        self.get()
    }

    pub fn comp_lat(self) -> ComparatorLatch {
        self.get()
    }

    pub fn comp_que(self) -> ComparatorQueue {
        self.get()
    }

    pub fn set_os(&mut self, os: OperationalStatus) {
        self.set(os)
    }

    pub fn set_mux(&mut self, mux: InputMux) {
        self.set(mux)
    }

    pub fn set_pga(&mut self, pga: FullScaleRange) {
        self.set(pga)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.set(mode)
    }

    pub fn set_data_rate(&mut self, rate: DataRate) {
        self.set(rate)
    }

    pub fn set_comparator(&mut self, comparator: ComparatorSettings) {
        self.set(comparator.mode);
        self.set(comparator.polarity);
        self.set(comparator.latch);
        self.set(comparator.queue);
    }

    pub fn decode(self) -> DeviceConfig {
        DeviceConfig {
            mode: self.mode(),
            mux: self.mux(),
            range: self.pga(),
            data_rate: self.data_rate(),
            comparator: ComparatorSettings {
                mode: self.comp_mode(),
                polarity: self.comp_pol(),
                latch: self.comp_lat(),
                queue: self.comp_que(),
            },
        }
    }
}

impl From<ConfigWord> for u16 {
    fn from(word: ConfigWord) -> Self {
        word.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparatorSettings {
    pub mode: ComparatorMode,
    pub polarity: ComparatorPolarity,
    pub latch: ComparatorLatch,
    pub queue: ComparatorQueue,
}

impl ComparatorSettings {
    /// Traditional, active-low, non-latching, ALERT/RDY pin high-impedance.
    pub const DISABLED: Self = Self {
        mode: ComparatorMode::Traditional,
        polarity: ComparatorPolarity::ActiveLow,
        latch: ComparatorLatch::NonLatching,
        queue: ComparatorQueue::Disabled,
    };
}

impl Default for ComparatorSettings {
    fn default() -> Self {
        Self::DISABLED
    }
}

/// Logical configuration of the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    pub mode: Mode,
    pub mux: InputMux,
    pub range: FullScaleRange,
    pub data_rate: DataRate,
    pub comparator: ComparatorSettings,
}

impl DeviceConfig {
    pub fn new(
        mode: Mode,
        mux: InputMux,
        range: FullScaleRange,
        data_rate: DataRate,
        comparator: ComparatorSettings,
    ) -> Self {
        Self {
            mode,
            mux,
            range,
            data_rate,
            comparator,
        }
    }

    /// Continuous conversion of AIN0 against GND at ±4.096 V, 1600 SPS,
    /// comparator off.
    pub fn rail_monitor() -> Self {
        Self::new(
            Mode::Continuous,
            InputMux::Ain0Gnd,
            FullScaleRange::Fs4v096,
            DataRate::Sps1600,
            ComparatorSettings::DISABLED,
        )
    }

    pub fn lsb_volts(&self) -> f32 {
        self.range.lsb_volts()
    }

    /// Packs the fields into a word with OS cleared.
    pub fn encode(&self) -> ConfigWord {
        let mut word = ConfigWord::from_bits(0);
        word.set_mode(self.mode);
        word.set_mux(self.mux);
        word.set_pga(self.range);
        word.set_data_rate(self.data_rate);
        word.set_comparator(self.comparator);
        word
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        ConfigWord::RESET.decode()
    }
}
