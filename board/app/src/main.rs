#![no_std]
#![no_main]

use app::ext::{peripherals_init, ADC_REGS};
use app::{halt, rcc_config, AdcWrapper, BoardClock, BoardDelay, SerialTxWrapper};
use app::config::AdcInputConfig;
use common::Peripheral;
use cortex_m_rt::entry;
use embassy_stm32::adc::{Adc, AdcChannel, Resolution as AdcResolution, SampleTime};
use embassy_stm32::gpio::{Level, Output, Speed as PinSpeed};
use embassy_stm32::usart::{Config as UartConfig, DataBits, Parity, StopBits, UartTx};
use math::Resolution;
use monitor::acquisition::Acquisition;
use monitor::cycle::{boot, Monitor};
use monitor::MonitorError;

use {defmt_rtt as _, panic_probe as _};

#[cfg(feature = "defmt-log")]
use defmt::info;

#[entry]
fn main() -> ! {
    let p = embassy_stm32::init(rcc_config());
    let config = peripherals_init(p);
    let monitor_config = config.monitor_config();
    let conversion_timeout = config.report.conversion_timeout();

    let mut status_led = Output::new(config.led.pin, Level::Low, PinSpeed::Low);

    let error = boot(|| {
        // 8N1, transmit only
        let mut uart_config = UartConfig::default();
        uart_config.baudrate = config.uart.baudrate;
        uart_config.data_bits = DataBits::DataBits8;
        uart_config.parity = Parity::ParityNone;
        uart_config.stop_bits = StopBits::STOP1;
        let tx = UartTx::new_blocking(config.uart.peripheral, config.uart.tx, uart_config)
            .map_err(|_| MonitorError::Init(Peripheral::Uart))?;

        let mut adc = Adc::new(config.adc.peripheral);
        adc.set_sample_time(SampleTime::CYCLES3);
        adc.set_resolution(AdcResolution::BITS12);
        let adc = AdcWrapper::new(
            adc,
            ADC_REGS,
            AdcInputConfig {
                pin: config.adc.moisture.pin.degrade_adc(),
                channel: config.adc.moisture.channel,
            },
            AdcInputConfig {
                pin: config.adc.thermistor.pin.degrade_adc(),
                channel: config.adc.thermistor.channel,
            },
            Resolution::BITS12,
        );

        #[cfg(feature = "defmt-log")]
        info!("Soil probe ready, {} baud", config.uart.baudrate);
        status_led.set_high();

        Ok(Monitor::new(
            Acquisition::new(adc, BoardClock {}, conversion_timeout),
            SerialTxWrapper::new(tx),
            BoardDelay {},
            monitor_config,
        ))
    });

    status_led.set_low();
    halt(error)
}
