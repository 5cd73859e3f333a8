use core::fmt::Display;

use measurements::{Resistance, Temperature, Voltage};

use crate::RawSample;

/*
The thermistor sits on the high side of a divider, the series resistor on the low side:

    Vadc = Vcc * Rseries / (Rseries + Rntc)
    Rntc = Rseries * (Vcc - Vadc) / Vadc
    1/T  = A + B * ln(Rntc) + C * ln(Rntc)^3      (T in kelvin)
*/

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum ThermistorError {
    /// Divider output at 0 V, the thermistor branch is open.
    OpenCircuit,
    /// Divider output at the supply rail, the thermistor is shorted.
    ShortCircuit,
    /// The reading produced a value outside the Steinhart-Hart model.
    OutOfModel,
}

impl Display for ThermistorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ThermistorError::OpenCircuit => core::write!(f, "Thermistor open circuit"),
            ThermistorError::ShortCircuit => core::write!(f, "Thermistor short circuit"),
            ThermistorError::OutOfModel => core::write!(f, "Thermistor reading out of model"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SteinhartHart {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl SteinhartHart {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn temperature(&self, resistance: Resistance) -> Result<Temperature, ThermistorError> {
        let ohms = resistance.as_ohms();
        if !ohms.is_finite() || ohms <= 0.0 {
            return Err(ThermistorError::OutOfModel);
        }
        let ln_r = libm::log(ohms);
        let inverse = self.a + self.b * ln_r + self.c * ln_r * ln_r * ln_r;
        if !inverse.is_finite() || inverse <= 0.0 {
            return Err(ThermistorError::OutOfModel);
        }
        Ok(Temperature::from_kelvin(1.0 / inverse))
    }
}

impl Default for SteinhartHart {
    // generic 10k NTC
    fn default() -> Self {
        Self::new(0.001129148, 0.000234125, 0.0000000876741)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ThermistorConfig {
    pub supply: Voltage,
    pub r_series: Resistance,
    pub coefficients: SteinhartHart,
}

impl Default for ThermistorConfig {
    fn default() -> Self {
        Self {
            supply: Voltage::from_volts(3.3),
            r_series: Resistance::from_ohms(10_000.0),
            coefficients: SteinhartHart::default(),
        }
    }
}

pub fn compute_adc_voltage(sample: RawSample, supply: Voltage) -> Voltage {
    Voltage::from_volts(
        f64::from(sample.value()) * supply.as_volts() / f64::from(sample.full_scale()),
    )
}

pub fn compute_thermistor_resistance(
    voltage: Voltage,
    supply: Voltage,
    r_series: Resistance,
) -> Result<Resistance, ThermistorError> {
    let v = voltage.as_volts();
    let vcc = supply.as_volts();
    if v <= 0.0 {
        return Err(ThermistorError::OpenCircuit);
    }
    if v >= vcc {
        return Err(ThermistorError::ShortCircuit);
    }
    let ohms = r_series.as_ohms() * (vcc - v) / v;
    if !ohms.is_finite() {
        return Err(ThermistorError::OutOfModel);
    }
    Ok(Resistance::from_ohms(ohms))
}

pub fn compute_thermistor_temperature(
    sample: RawSample,
    config: &ThermistorConfig,
) -> Result<Temperature, ThermistorError> {
    // the rails are decided on the integer code, float rounding of the voltage must not decide them
    if sample.is_zero() {
        return Err(ThermistorError::OpenCircuit);
    }
    if sample.is_full_scale() {
        return Err(ThermistorError::ShortCircuit);
    }
    let voltage = compute_adc_voltage(sample, config.supply);
    let resistance = compute_thermistor_resistance(voltage, config.supply, config.r_series)?;
    config.coefficients.temperature(resistance)
}
