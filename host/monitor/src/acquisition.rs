use core::fmt::Display;
use core::time::Duration;

use common::{AdcBase, AdcError, ClockBase, SensorChannel};
use math::RawSample;

#[cfg(feature = "defmt-log")]
use defmt::trace;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum AcquisitionError {
    Timeout(SensorChannel),
    Adc(AdcError),
    OutOfRange(u16),
}

impl Display for AcquisitionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AcquisitionError::Timeout(channel) => {
                core::write!(f, "{} conversion timed out", channel)
            }
            AcquisitionError::Adc(error) => core::write!(f, "{}", error),
            AcquisitionError::OutOfRange(value) => {
                core::write!(f, "ADC returned {} which is above full scale", value)
            }
        }
    }
}

/// Owns the ADC and takes one blocking sample at a time.
pub struct Acquisition<A: AdcBase, C: ClockBase> {
    adc: A,
    clock: C,
    timeout: Duration,
}

impl<A: AdcBase, C: ClockBase> Acquisition<A, C> {
    pub fn new(adc: A, clock: C, timeout: Duration) -> Self {
        Self {
            adc,
            clock,
            timeout,
        }
    }

    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    /// The ADC is stopped again whatever the outcome, so the next call may switch channel.
    pub fn sample(&mut self, channel: SensorChannel) -> Result<RawSample, AcquisitionError> {
        self.adc.select(channel).map_err(AcquisitionError::Adc)?;
        let started = self.clock.now();
        self.adc.start();
        let result = self.wait_for_conversion(channel, started);
        self.adc.stop();

        let value = result?;
        let sample = RawSample::new(value, self.adc.resolution())
            .ok_or(AcquisitionError::OutOfRange(value))?;
        #[cfg(feature = "defmt-log")]
        trace!("[ACQUISITION] {} = {}", channel, value);
        Ok(sample)
    }

    fn wait_for_conversion(
        &mut self,
        channel: SensorChannel,
        started: Duration,
    ) -> Result<u16, AcquisitionError> {
        loop {
            match self.adc.poll() {
                Ok(value) => return Ok(value),
                Err(nb::Error::WouldBlock) => {
                    if self.clock.now().saturating_sub(started) >= self.timeout {
                        return Err(AcquisitionError::Timeout(channel));
                    }
                }
                Err(nb::Error::Other(error)) => return Err(AcquisitionError::Adc(error)),
            }
        }
    }
}
