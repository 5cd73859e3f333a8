#![cfg_attr(not(test), no_std)]

use core::fmt::Display;
use core::time::Duration;

use math::Resolution;

/// Logical analog input, mapped to a physical pin by the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum SensorChannel {
    Moisture,
    Thermistor,
}

impl Display for SensorChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorChannel::Moisture => core::write!(f, "moisture"),
            SensorChannel::Thermistor => core::write!(f, "thermistor"),
        }
    }
}

/// Peripherals brought up before the report loop starts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Peripheral {
    Clock,
    Gpio,
    Adc,
    Uart,
}

impl Display for Peripheral {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Peripheral::Clock => core::write!(f, "clock"),
            Peripheral::Gpio => core::write!(f, "GPIO"),
            Peripheral::Adc => core::write!(f, "ADC"),
            Peripheral::Uart => core::write!(f, "UART"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum AdcError {
    ChannelConfig,
    Overrun,
}

impl Display for AdcError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AdcError::ChannelConfig => core::write!(f, "ADC channel configuration failed"),
            AdcError::Overrun => core::write!(f, "ADC overrun"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum SerialError {
    Write,
}

impl Display for SerialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SerialError::Write => core::write!(f, "serial write failed"),
        }
    }
}

/// Single-conversion ADC. A conversion is `select` -> `start` -> `poll` until ready -> `stop`.
pub trait AdcBase {
    fn resolution(&self) -> Resolution;
    fn select(&mut self, channel: SensorChannel) -> Result<(), AdcError>;
    fn start(&mut self);
    /// `WouldBlock` while the conversion is still running.
    fn poll(&mut self) -> nb::Result<u16, AdcError>;
    fn stop(&mut self);
}

pub trait SerialTxBase {
    /// Blocks until every byte has been handed to the transmitter.
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError>;
}

pub trait DelayBase {
    fn delay(&mut self, duration: Duration);
}

/// Monotonic time since boot.
pub trait ClockBase {
    fn now(&self) -> Duration;
}
