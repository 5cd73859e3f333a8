use core::convert::Infallible;
use core::time::Duration;

use common::{AdcBase, ClockBase, DelayBase, SensorChannel, SerialTxBase};
use math::moisture::compute_moisture_percentage;
use math::thermistor::{compute_thermistor_temperature, ThermistorConfig};

use crate::acquisition::Acquisition;
use crate::report::{format_report, Reading};
use crate::MonitorError;

#[cfg(feature = "defmt-log")]
use defmt::{info, warn};

pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_CONVERSION_TIMEOUT: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug)]
pub struct MonitorConfig {
    /// Sleep after each transmission. Not a period: the cadence also includes
    /// conversion and transmission time.
    pub interval: Duration,
    pub thermistor: ThermistorConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REPORT_INTERVAL,
            thermistor: ThermistorConfig::default(),
        }
    }
}

pub struct Monitor<A: AdcBase, C: ClockBase, S: SerialTxBase, D: DelayBase> {
    acquisition: Acquisition<A, C>,
    serial: S,
    delay: D,
    config: MonitorConfig,
}

impl<A: AdcBase, C: ClockBase, S: SerialTxBase, D: DelayBase> Monitor<A, C, S, D> {
    pub fn new(acquisition: Acquisition<A, C>, serial: S, delay: D, config: MonitorConfig) -> Self {
        Self {
            acquisition,
            serial,
            delay,
            config,
        }
    }

    pub fn get_config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn read(&mut self) -> Result<Reading, MonitorError> {
        let moisture = self.acquisition.sample(SensorChannel::Moisture)?;
        let thermistor = self.acquisition.sample(SensorChannel::Thermistor)?;

        let moisture = compute_moisture_percentage(moisture);
        let temperature = compute_thermistor_temperature(thermistor, &self.config.thermistor);
        #[cfg(feature = "defmt-log")]
        if let Err(error) = temperature {
            warn!("[MONITOR] {} (raw value: {})", error, thermistor.value());
        }
        Ok(Reading {
            temperature,
            moisture,
        })
    }

    pub fn transmit(&mut self, reading: &Reading) -> Result<(), MonitorError> {
        let line = format_report(reading)?;
        self.serial.write(line.as_bytes())?;
        Ok(())
    }

    /// Acquire, convert, send, then sleep for the configured interval.
    pub fn run_cycle(&mut self) -> Result<Reading, MonitorError> {
        let reading = self.read()?;
        self.transmit(&reading)?;
        self.delay.delay(self.config.interval);
        Ok(reading)
    }

    /// Only returns on a fatal error.
    pub fn run(&mut self) -> Result<Infallible, MonitorError> {
        #[cfg(feature = "defmt-log")]
        info!(
            "[MONITOR] Reporting every {} ms",
            self.config.interval.as_millis() as u64
        );
        loop {
            self.run_cycle()?;
        }
    }
}

/// Brings the peripherals up through `init` and runs the report loop.
/// The returned error is what stopped the probe; the caller is expected to halt on it.
pub fn boot<A, C, S, D, F>(init: F) -> MonitorError
where
    A: AdcBase,
    C: ClockBase,
    S: SerialTxBase,
    D: DelayBase,
    F: FnOnce() -> Result<Monitor<A, C, S, D>, MonitorError>,
{
    let mut monitor = match init() {
        Ok(monitor) => monitor,
        Err(error) => return error,
    };
    match monitor.run() {
        Ok(never) => match never {},
        Err(error) => error,
    }
}
