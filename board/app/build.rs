use std::{
    env,
    fs,
    path::{Path, PathBuf},
};

mod external {
    use std::ops::Not;

    use serde_derive::{Deserialize, Serialize};

    fn get_string_value(s: String) -> Option<String> {
        s.is_empty().not().then_some(s)
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct PinConfig {
        pin: String,
    }

    impl PinConfig {
        pub fn get_pin(&self) -> Option<String> {
            get_string_value(self.pin.clone())
        }
    }

    /* UART */
    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct UartConfig {
        peripheral: String,
        baudrate: u32,
        tx: PinConfig,
    }

    impl UartConfig {
        pub fn get_peripheral(&self) -> Option<String> {
            get_string_value(self.peripheral.clone())
        }

        pub fn get_baudrate(&self) -> u32 {
            self.baudrate
        }

        pub fn get_tx(&self) -> PinConfig {
            self.tx.clone()
        }
    }

    /* ADC */
    // [adc.moisture]
    // pin = "PA0"
    // channel = 0
    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct AdcInputConfig {
        pin: String,
        channel: u8,
    }

    impl AdcInputConfig {
        pub fn get_pin(&self) -> Option<String> {
            get_string_value(self.pin.clone())
        }

        pub fn get_channel(&self) -> u8 {
            self.channel
        }
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct AdcConfig {
        peripheral: String,
        moisture: AdcInputConfig,
        thermistor: AdcInputConfig,
    }

    impl AdcConfig {
        pub fn get_peripheral(&self) -> Option<String> {
            get_string_value(self.peripheral.clone())
        }

        pub fn get_moisture(&self) -> AdcInputConfig {
            self.moisture.clone()
        }

        pub fn get_thermistor(&self) -> AdcInputConfig {
            self.thermistor.clone()
        }
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone, Copy)]
    pub struct ReportConfig {
        interval_ms: u64,
        conversion_timeout_ms: u64,
    }

    impl ReportConfig {
        pub fn get_interval_ms(&self) -> u64 {
            self.interval_ms
        }

        pub fn get_conversion_timeout_ms(&self) -> u64 {
            self.conversion_timeout_ms
        }
    }

    // [thermistor]
    // supply = 3.3
    // r_series = 10000.0
    // a = 0.001129148
    // b = 0.000234125
    // c = 0.0000000876741
    #[derive(Default, Debug, Serialize, Deserialize, Clone, Copy)]
    pub struct ThermistorConfig {
        supply: f64,
        r_series: f64,
        a: f64,
        b: f64,
        c: f64,
    }

    impl ThermistorConfig {
        pub fn get_supply(&self) -> f64 {
            self.supply
        }

        pub fn get_r_series(&self) -> f64 {
            self.r_series
        }

        pub fn get_coefficients(&self) -> (f64, f64, f64) {
            (self.a, self.b, self.c)
        }
    }

    #[derive(Default, Debug, Serialize, Deserialize, Clone)]
    pub struct ProbeConfig {
        pub uart: UartConfig,
        pub adc: AdcConfig,
        pub led: PinConfig,
        pub report: ReportConfig,
        pub thermistor: ThermistorConfig,
    }
}

fn main() {
    println!("cargo::rerun-if-changed=config/config.toml");
    let path = Path::new("config/config.toml");
    let conf = confy::load_path::<external::ProbeConfig>(path).expect("Error reading config file");

    let uart_peripheral = conf
        .uart
        .get_peripheral()
        .expect("UART peripheral is missing");
    let uart_baudrate = conf.uart.get_baudrate();
    let uart_tx_pin = conf
        .uart
        .get_tx()
        .get_pin()
        .expect("UART TX pin is missing");

    let adc_peripheral = conf
        .adc
        .get_peripheral()
        .expect("ADC peripheral is missing");
    let moisture_pin = conf
        .adc
        .get_moisture()
        .get_pin()
        .expect("Moisture ADC input pin is missing");
    let moisture_channel = conf.adc.get_moisture().get_channel();
    let thermistor_pin = conf
        .adc
        .get_thermistor()
        .get_pin()
        .expect("Thermistor ADC input pin is missing");
    let thermistor_channel = conf.adc.get_thermistor().get_channel();

    let led_pin = conf.led.get_pin().expect("Status LED pin is missing");

    let interval_ms = conf.report.get_interval_ms();
    let conversion_timeout_ms = conf.report.get_conversion_timeout_ms();

    let thermistor_supply = conf.thermistor.get_supply();
    let thermistor_r_series = conf.thermistor.get_r_series();
    let (thermistor_a, thermistor_b, thermistor_c) = conf.thermistor.get_coefficients();

    if uart_baudrate == 0 {
        panic!("UART baudrate must be greater than 0");
    }
    if moisture_channel > 18 || thermistor_channel > 18 {
        panic!("ADC channels must be between 0 and 18");
    }
    if moisture_channel == thermistor_channel {
        panic!("Moisture and thermistor must use different ADC channels");
    }
    if conversion_timeout_ms == 0 {
        panic!("Conversion timeout must be greater than 0");
    }
    if thermistor_supply <= 0.0 || thermistor_r_series <= 0.0 {
        panic!("Thermistor supply and series resistor must be positive");
    }

    // floats are written with {:?} so they keep every digit and stay valid literals
    let string = format!(
        "

use embassy_stm32::Peripherals;
use embassy_stm32::peripherals::*;
use crate::config::*;

pub type UartPeripheral = {};
pub type UartTxPin = {};
pub type AdcPeripheral = {};
pub type MoisturePin = {};
pub type ThermistorPin = {};
pub type StatusLedPin = {};

pub const ADC_REGS: embassy_stm32::pac::adc::Adc = embassy_stm32::pac::{};

pub fn peripherals_init(p: Peripherals) -> BoardConfig<
    UartPeripheral,
    UartTxPin,
    AdcPeripheral,
    MoisturePin,
    ThermistorPin,
    StatusLedPin,
>{{
    BoardConfig{{
        uart: UartConfig{{
            peripheral: p.{},
            baudrate: {},
            tx: p.{},
        }},
        adc: AdcConfig{{
            peripheral: p.{},
            moisture: AdcInputConfig{{
                pin: p.{},
                channel: {},
            }},
            thermistor: AdcInputConfig{{
                pin: p.{},
                channel: {},
            }},
        }},
        led: LedConfig{{
            pin: p.{},
        }},
        report: ReportConfig{{
            interval_ms: {},
            conversion_timeout_ms: {},
        }},
        thermistor: ThermistorCalibration{{
            supply: {:?},
            r_series: {:?},
            a: {:?},
            b: {:?},
            c: {:?},
        }},
    }}
}}

",
        uart_peripheral,
        uart_tx_pin,
        adc_peripheral,
        moisture_pin,
        thermistor_pin,
        led_pin,
        adc_peripheral,
        uart_peripheral,
        uart_baudrate,
        uart_tx_pin,
        adc_peripheral,
        moisture_pin,
        moisture_channel,
        thermistor_pin,
        thermistor_channel,
        led_pin,
        interval_ms,
        conversion_timeout_ms,
        thermistor_supply,
        thermistor_r_series,
        thermistor_a,
        thermistor_b,
        thermistor_c,
    );
    let out_dir = &PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is not set"));
    let out_file = out_dir.join("_ext.rs").to_string_lossy().to_string();
    fs::write(&out_file, string.as_str()).expect("Cannot write generated peripheral map");
}
