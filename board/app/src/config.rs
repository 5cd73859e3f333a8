use core::time::Duration;

use math::measurements::{Resistance, Voltage};
use math::thermistor::{SteinhartHart, ThermistorConfig};
use monitor::cycle::MonitorConfig;

pub struct UartConfig<P, TX> {
    pub peripheral: P,
    pub baudrate: u32,
    pub tx: TX,
}

pub struct AdcInputConfig<I> {
    pub pin: I,
    pub channel: u8,
}

pub struct AdcConfig<P, M, T> {
    pub peripheral: P,
    pub moisture: AdcInputConfig<M>,
    pub thermistor: AdcInputConfig<T>,
}

pub struct LedConfig<L> {
    pub pin: L,
}

#[derive(Clone, Copy)]
pub struct ReportConfig {
    pub interval_ms: u64,
    pub conversion_timeout_ms: u64,
}

impl ReportConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn conversion_timeout(&self) -> Duration {
        Duration::from_millis(self.conversion_timeout_ms)
    }
}

#[derive(Clone, Copy)]
pub struct ThermistorCalibration {
    pub supply: f64,
    pub r_series: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl From<ThermistorCalibration> for ThermistorConfig {
    fn from(value: ThermistorCalibration) -> Self {
        ThermistorConfig {
            supply: Voltage::from_volts(value.supply),
            r_series: Resistance::from_ohms(value.r_series),
            coefficients: SteinhartHart::new(value.a, value.b, value.c),
        }
    }
}

pub struct BoardConfig<UP, UTX, AP, AM, AT, L> {
    pub uart: UartConfig<UP, UTX>,
    pub adc: AdcConfig<AP, AM, AT>,
    pub led: LedConfig<L>,
    pub report: ReportConfig,
    pub thermistor: ThermistorCalibration,
}

impl<UP, UTX, AP, AM, AT, L> BoardConfig<UP, UTX, AP, AM, AT, L> {
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            interval: self.report.interval(),
            thermistor: self.thermistor.into(),
        }
    }
}
