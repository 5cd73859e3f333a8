#![cfg_attr(not(test), no_std)]

use core::fmt::Display;

use common::{Peripheral, SerialError};

use crate::acquisition::AcquisitionError;
use crate::report::ReportError;

pub mod acquisition;
pub mod cycle;
pub mod report;

#[cfg(test)]
mod mock;

/// Every error the probe can hit is fatal: the board halts on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum MonitorError {
    Init(Peripheral),
    Acquisition(AcquisitionError),
    Report(ReportError),
    Transmit(SerialError),
}

impl Display for MonitorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MonitorError::Init(peripheral) => {
                core::write!(f, "Cannot initialize {}", peripheral)
            }
            MonitorError::Acquisition(error) => core::write!(f, "Acquisition failed: {}", error),
            MonitorError::Report(error) => core::write!(f, "Report failed: {}", error),
            MonitorError::Transmit(error) => core::write!(f, "Transmission failed: {}", error),
        }
    }
}

impl From<AcquisitionError> for MonitorError {
    fn from(value: AcquisitionError) -> Self {
        MonitorError::Acquisition(value)
    }
}

impl From<ReportError> for MonitorError {
    fn from(value: ReportError) -> Self {
        MonitorError::Report(value)
    }
}

impl From<SerialError> for MonitorError {
    fn from(value: SerialError) -> Self {
        MonitorError::Transmit(value)
    }
}
