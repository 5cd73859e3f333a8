#![no_std]

use common::{AdcBase, AdcError, ClockBase, DelayBase, SensorChannel, SerialError, SerialTxBase};
use crate::config::AdcInputConfig;
use embassy_stm32::{
    adc::{Adc, AnyAdcChannel, Instance},
    mode::Blocking,
    pac,
    usart::UartTx,
};
use embassy_time::{block_for, Instant};
use math::Resolution;
use monitor::MonitorError;

#[cfg(feature = "defmt-log")]
use defmt::error;

pub mod config;
pub mod ext;

/// 84 MHz from the 16 MHz HSI: /16 * 336 / 4, APB1 at half speed.
pub fn rcc_config() -> embassy_stm32::Config {
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hsi = true;
        config.rcc.pll_src = PllSource::HSI;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV16,
            mul: PllMul::MUL336,
            divp: Some(PllPDiv::DIV4),
            divq: None,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV2;
        config.rcc.apb2_pre = APBPrescaler::DIV1;
    }
    config
}

/// Permanent stop. No watchdog, no retry.
pub fn halt(error: MonitorError) -> ! {
    #[cfg(feature = "defmt-log")]
    error!("[BOARD] {}, halting", error);
    #[cfg(not(feature = "defmt-log"))]
    let _ = error;
    loop {
        cortex_m::asm::nop();
    }
}

/*
embassy only exposes a conversion that spins until EOC, which leaves no room for a timeout.
The driver is used to power the ADC up and to put both inputs in analog mode with their sample
time programmed; the conversions themselves go through the registers so that `poll` can
return while the converter is still busy.
*/
pub struct AdcWrapper<'a, T: Instance> {
    _inner: Adc<'a, T>,
    regs: pac::adc::Adc,
    moisture: AdcInputConfig<AnyAdcChannel<T>>,
    thermistor: AdcInputConfig<AnyAdcChannel<T>>,
    resolution: Resolution,
    running: bool,
}

impl<'a, T: Instance> AdcWrapper<'a, T> {
    pub fn new(
        mut inner: Adc<'a, T>,
        regs: pac::adc::Adc,
        mut moisture: AdcInputConfig<AnyAdcChannel<T>>,
        mut thermistor: AdcInputConfig<AnyAdcChannel<T>>,
        resolution: Resolution,
    ) -> Self {
        // first conversion configures the pin and the channel sample time, its value is dropped
        inner.blocking_read(&mut moisture.pin);
        inner.blocking_read(&mut thermistor.pin);
        Self {
            _inner: inner,
            regs,
            moisture,
            thermistor,
            resolution,
            running: false,
        }
    }

    fn channel_number(&self, channel: SensorChannel) -> u8 {
        match channel {
            SensorChannel::Moisture => self.moisture.channel,
            SensorChannel::Thermistor => self.thermistor.channel,
        }
    }
}

impl<T: Instance> AdcBase for AdcWrapper<'_, T> {
    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn select(&mut self, channel: SensorChannel) -> Result<(), AdcError> {
        if self.running {
            return Err(AdcError::ChannelConfig);
        }
        let number = self.channel_number(channel);
        self.regs.sqr3().write(|w| w.set_sq(0, number));
        Ok(())
    }

    fn start(&mut self) {
        self.regs.sr().modify(|w| {
            w.set_eoc(false);
            w.set_ovr(false);
        });
        self.regs.cr2().modify(|w| w.set_swstart(true));
        self.running = true;
    }

    fn poll(&mut self) -> nb::Result<u16, AdcError> {
        let sr = self.regs.sr().read();
        if sr.ovr() {
            return Err(nb::Error::Other(AdcError::Overrun));
        }
        if !sr.eoc() {
            return Err(nb::Error::WouldBlock);
        }
        // reading DR clears EOC
        Ok(self.regs.dr().read().0 as u16)
    }

    fn stop(&mut self) {
        self.regs.sr().modify(|w| {
            w.set_eoc(false);
            w.set_strt(false);
            w.set_ovr(false);
        });
        self.running = false;
    }
}

pub struct SerialTxWrapper<'a> {
    inner: UartTx<'a, Blocking>,
}

impl<'a> SerialTxWrapper<'a> {
    pub fn new(inner: UartTx<'a, Blocking>) -> Self {
        Self { inner }
    }
}

impl SerialTxBase for SerialTxWrapper<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        self.inner
            .blocking_write(bytes)
            .map_err(|_| SerialError::Write)?;
        self.inner.blocking_flush().map_err(|_| SerialError::Write)
    }
}

pub struct BoardClock {}

impl ClockBase for BoardClock {
    fn now(&self) -> core::time::Duration {
        core::time::Duration::from_micros(Instant::now().as_micros())
    }
}

pub struct BoardDelay {}

impl DelayBase for BoardDelay {
    fn delay(&mut self, duration: core::time::Duration) {
        let duration = embassy_time::Duration::from_micros(duration.as_micros() as u64);
        block_for(duration)
    }
}
