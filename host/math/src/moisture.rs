use core::fmt::Display;

use crate::RawSample;

/// Soil moisture on a 0..=100 scale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct MoisturePercentage {
    value: u8,
}

impl MoisturePercentage {
    pub const MAX: u8 = 100;

    pub fn from_percent(value: u8) -> Option<Self> {
        if value > Self::MAX {
            return None;
        }
        Some(Self { value })
    }

    pub fn as_percent(&self) -> u8 {
        self.value
    }
}

impl Display for MoisturePercentage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::write!(f, "{}", self.value)
    }
}

// floor(raw * 100 / full_scale), truncating division
pub fn compute_moisture_percentage(sample: RawSample) -> MoisturePercentage {
    let full_scale = u32::from(sample.full_scale());
    let value = u32::from(sample.value()) * u32::from(MoisturePercentage::MAX) / full_scale;
    // RawSample is never above full scale, so the quotient is at most 100
    MoisturePercentage {
        value: value.min(u32::from(MoisturePercentage::MAX)) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Resolution;

    fn sample(value: u16) -> RawSample {
        RawSample::new(value, Resolution::BITS12).unwrap()
    }

    #[test]
    fn test_moisture_dry() {
        assert_eq!(compute_moisture_percentage(sample(0)).as_percent(), 0);
    }

    #[test]
    fn test_moisture_saturated() {
        assert_eq!(compute_moisture_percentage(sample(4095)).as_percent(), 100);
    }

    #[test]
    fn test_moisture_truncates() {
        // 4094 * 100 / 4095 = 99.97
        assert_eq!(compute_moisture_percentage(sample(4094)).as_percent(), 99);
        // 41 * 100 / 4095 = 1.0012
        assert_eq!(compute_moisture_percentage(sample(41)).as_percent(), 1);
        assert_eq!(compute_moisture_percentage(sample(40)).as_percent(), 0);
    }

    #[test]
    fn test_moisture_midpoint() {
        assert_eq!(compute_moisture_percentage(sample(2048)).as_percent(), 50);
        assert_eq!(compute_moisture_percentage(sample(1000)).as_percent(), 24);
        assert_eq!(compute_moisture_percentage(sample(3000)).as_percent(), 73);
    }

    #[test]
    fn test_moisture_whole_range() {
        for raw in 0..=4095u16 {
            let percentage = compute_moisture_percentage(sample(raw)).as_percent();
            assert_eq!(u32::from(percentage), u32::from(raw) * 100 / 4095);
            assert!(percentage <= 100);
        }
    }

    #[test]
    fn test_moisture_other_resolution() {
        let s = RawSample::new(255, Resolution::BITS8).unwrap();
        assert_eq!(compute_moisture_percentage(s).as_percent(), 100);
        let s = RawSample::new(128, Resolution::BITS8).unwrap();
        assert_eq!(compute_moisture_percentage(s).as_percent(), 50);
    }

    #[test]
    fn test_moisture_from_percent() {
        assert!(MoisturePercentage::from_percent(100).is_some());
        assert!(MoisturePercentage::from_percent(101).is_none());
    }
}
