#![cfg_attr(not(test), no_std)]

pub use measurements;

pub mod moisture;
pub mod thermistor;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Resolution {
    BITS16,
    BITS14,
    BITS12,
    BITS10,
    BITS8,
}

impl Resolution {
    pub fn bits(&self) -> u8 {
        match self {
            Resolution::BITS16 => 16,
            Resolution::BITS14 => 14,
            Resolution::BITS12 => 12,
            Resolution::BITS10 => 10,
            Resolution::BITS8 => 8,
        }
    }

    /// Highest code the converter can output, e.g. 4095 for 12 bits.
    pub fn full_scale(&self) -> u16 {
        ((1u32 << self.bits()) - 1) as u16
    }
}

impl From<Resolution> for u64 {
    fn from(value: Resolution) -> Self {
        1 << value.bits()
    }
}

/// One unconverted ADC code together with the resolution it was taken at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct RawSample {
    value: u16,
    resolution: Resolution,
}

impl RawSample {
    /// Returns `None` when `value` does not fit the resolution.
    pub fn new(value: u16, resolution: Resolution) -> Option<Self> {
        if value > resolution.full_scale() {
            return None;
        }
        Some(Self { value, resolution })
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn full_scale(&self) -> u16 {
        self.resolution.full_scale()
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    pub fn is_full_scale(&self) -> bool {
        self.value == self.full_scale()
    }
}
