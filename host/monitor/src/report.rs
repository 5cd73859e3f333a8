use core::fmt::{Display, Write};

use heapless::String;
use math::measurements::Temperature;
use math::moisture::MoisturePercentage;
use math::thermistor::ThermistorError;

pub const REPORT_LINE_LEN: usize = 32;

// "<temperature>,<moisture>\n"
pub type ReportLine = String<REPORT_LINE_LEN>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum ReportError {
    Overflow,
}

impl Display for ReportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReportError::Overflow => {
                core::write!(f, "Report longer than {} bytes", REPORT_LINE_LEN)
            }
        }
    }
}

/// What one cycle measured.
#[derive(Clone, Copy, Debug)]
pub struct Reading {
    pub temperature: Result<Temperature, ThermistorError>,
    pub moisture: MoisturePercentage,
}

impl Display for Reading {
    // a faulted thermistor is sent as "nan", the way printf renders NaN
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.temperature {
            Ok(temperature) => core::write!(f, "{:.2},{}", temperature.as_celsius(), self.moisture),
            Err(_) => core::write!(f, "nan,{}", self.moisture),
        }
    }
}

pub fn format_report(reading: &Reading) -> Result<ReportLine, ReportError> {
    let mut line = ReportLine::new();
    core::write!(line, "{}\n", reading).map_err(|_| ReportError::Overflow)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(celsius: f64, moisture: u8) -> Reading {
        Reading {
            temperature: Ok(Temperature::from_celsius(celsius)),
            moisture: MoisturePercentage::from_percent(moisture).unwrap(),
        }
    }

    #[test]
    fn test_format_report_rounds_temperature() {
        let line = format_report(&reading(23.456, 57));
        assert!(line.is_ok());
        assert_eq!(line.unwrap().as_str(), "23.46,57\n");
    }

    #[test]
    fn test_format_report_pads_decimals() {
        assert_eq!(format_report(&reading(25.0, 0)).unwrap().as_str(), "25.00,0\n");
        assert_eq!(format_report(&reading(1.5, 100)).unwrap().as_str(), "1.50,100\n");
    }

    #[test]
    fn test_format_report_negative() {
        assert_eq!(
            format_report(&reading(-97.8623, 3)).unwrap().as_str(),
            "-97.86,3\n"
        );
    }

    #[test]
    fn test_format_report_thermistor_fault() {
        let r = Reading {
            temperature: Err(ThermistorError::OpenCircuit),
            moisture: MoisturePercentage::from_percent(42).unwrap(),
        };
        assert_eq!(format_report(&r).unwrap().as_str(), "nan,42\n");
    }

    #[test]
    fn test_format_report_overflow() {
        let r = reading(1.0e40, 100);
        assert_eq!(format_report(&r).err(), Some(ReportError::Overflow));
    }
}
