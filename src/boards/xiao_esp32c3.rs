// src/boards/xiao_esp32c3.rs
#![cfg(feature = "xiao-esp32c3")]

// Xiao Pin Connections
// D0 - LDR ADC Input
// D1 - LED PWM Output
// D2 - Alarm LED Output
// D3 - LED Control Button Input
// D8 - High Limit Button Input
// D9 - Low Limit Button Input
//
// The serial console is left to the application: feed received bytes to
// `Controller::handle_byte` and pass any `core::fmt::Write` sink for output.

use esp_hal::{
    analog::adc::{Adc, AdcConfig, AdcPin, Attenuation},
    gpio::{DriveMode, Input, InputConfig, Level, Output, OutputConfig, Pull},
    ledc::{
        channel::{self, Channel, ChannelIFace},
        timer::{self, Timer, TimerIFace},
        LSGlobalClkSource, Ledc, LowSpeed,
    },
    peripherals::{ADC1, GPIO2, GPIO3, GPIO4, GPIO5, GPIO8, GPIO9, LEDC},
    time::Rate,
    Blocking,
};
use log::warn;

use crate::components::ldr::OneShot;
use crate::components::led::Led;
use crate::{Config, Controller, Error, Parts};

/// LED PWM carrier frequency, high enough to avoid visible flicker.
const LED_PWM_KHZ: u32 = 5;

// ------------------------------------------
// Type Definitions
// ------------------------------------------

pub struct LdrAdc<'d> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
    pin: AdcPin<GPIO2<'d>, ADC1<'d>>,
}

impl<'d> OneShot for LdrAdc<'d> {
    fn read_raw(&mut self) -> u16 {
        nb::block!(self.adc.read_oneshot(&mut self.pin)).unwrap_or(0)
    }
}

pub type LedChannel<'d> = Channel<'d, LowSpeed>;

pub type UferrisLight<'d> = Controller<
    Led<LedChannel<'d>>, // LED (D1)
    Output<'d>,          // Alarm (D2)
    Input<'d>,           // Buttons (D3, D8, D9)
    LdrAdc<'d>,          // LDR (D0)
>;

/// GPIOs used by the board, other than the LED PWM pin.
pub struct Pins<'d> {
    pub ldr: GPIO2<'d>,
    pub alarm: GPIO4<'d>,
    pub led_button: GPIO5<'d>,
    pub high_button: GPIO8<'d>,
    pub low_button: GPIO9<'d>,
}

// ------------------------------------------
// LEDC - PWM Setup
// ------------------------------------------

/// Take the LEDC peripheral and clock it from APB.
pub fn ledc<'d>(ledc: LEDC<'d>) -> Ledc<'d> {
    let mut ledc = Ledc::new(ledc);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
    ledc
}

/// Configure LEDC timer 0 for the LED.
pub fn led_timer<'d>(ledc: &Ledc<'d>) -> Result<Timer<'d, LowSpeed>, Error> {
    let mut led_timer = ledc.timer::<LowSpeed>(timer::Number::Timer0);
    led_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty10Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_khz(LED_PWM_KHZ),
        })
        .map_err(|e| {
            warn!("LED timer setup failed: {:?}", e);
            Error::Led
        })?;
    Ok(led_timer)
}

/// Attach the LED pin (D1) to channel 0, starting dark.
pub fn led_channel<'d>(
    ledc: &Ledc<'d>,
    led_timer: &'d Timer<'d, LowSpeed>,
    pin: GPIO3<'d>,
) -> Result<LedChannel<'d>, Error> {
    let mut led_channel = ledc.channel(channel::Number::Channel0, pin);
    led_channel
        .configure(channel::config::Config {
            timer: led_timer,
            duty_pct: 0,
            drive_mode: DriveMode::PushPull,
        })
        .map_err(|e| {
            warn!("LED channel setup failed: {:?}", e);
            Error::Led
        })?;
    Ok(led_channel)
}

// ==========================================
// Initialization Function
// ==========================================

/// Build the controller from the board peripherals.
///
/// ```ignore
/// let peripherals = esp_hal::init(esp_hal::Config::default());
/// let ledc = xiao_esp32c3::ledc(peripherals.LEDC);
/// let timer = xiao_esp32c3::led_timer(&ledc)?;
/// let channel = xiao_esp32c3::led_channel(&ledc, &timer, peripherals.GPIO3)?;
/// let pins = xiao_esp32c3::Pins { ldr: peripherals.GPIO2, /* ... */ };
/// let mut board = xiao_esp32c3::init(peripherals.ADC1, pins, channel, Config::default())?;
/// ```
pub fn init<'d>(
    adc1: ADC1<'d>,
    pins: Pins<'d>,
    led_channel: LedChannel<'d>,
    config: Config,
) -> Result<UferrisLight<'d>, Error> {
    // Configure ADC on GPIO 2
    let mut adc_config = AdcConfig::new();
    let ldr_pin = adc_config.enable_pin(pins.ldr, Attenuation::_11dB);
    let ldr = LdrAdc {
        adc: Adc::new(adc1, adc_config),
        pin: ldr_pin,
    };

    let alarm = Output::new(pins.alarm, Level::Low, OutputConfig::default());

    // Idle level is the opposite of the pressed level
    let pull = if config.button_active_low {
        Pull::Up
    } else {
        Pull::Down
    };
    let led_button = Input::new(pins.led_button, InputConfig::default().with_pull(pull));
    let high_button = Input::new(pins.high_button, InputConfig::default().with_pull(pull));
    let low_button = Input::new(pins.low_button, InputConfig::default().with_pull(pull));

    Controller::new(
        Parts {
            led: Led::new(led_channel),
            alarm,
            led_button,
            high_button,
            low_button,
            ldr,
        },
        config,
    )
}
