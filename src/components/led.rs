use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

/// Brightness values are percent; anything above this is treated as full on.
pub const MAX_BRIGHTNESS: u8 = 100;

/// A light source whose intensity can be set.
///
/// This is the single capability every LED driver on the board exposes.
/// Drivers clamp values above [`MAX_BRIGHTNESS`] instead of failing.
pub trait SetBrightness {
    type Error: Debug;

    fn set_brightness(&mut self, brightness: u8) -> Result<(), Self::Error>;
}

impl<T: SetBrightness + ?Sized> SetBrightness for &mut T {
    type Error = T::Error;

    fn set_brightness(&mut self, brightness: u8) -> Result<(), Self::Error> {
        (**self).set_brightness(brightness)
    }
}

// ------------------------------------------
// PWM LED
// ------------------------------------------

/// LED on a PWM channel. Brightness maps linearly onto the duty cycle.
pub struct Led<PWM>
where
    PWM: SetDutyCycle,
{
    pwm: PWM,
    brightness: u8,
}

impl<PWM: SetDutyCycle> Led<PWM> {
    /// Wrap a PWM channel without touching the hardware.
    pub fn new(pwm: PWM) -> Self {
        Self { pwm, brightness: 0 }
    }

    /// Wrap a PWM channel and switch the LED fully off.
    pub fn init(pwm: PWM) -> Result<Self, PWM::Error> {
        let mut led = Self::new(pwm);
        led.pwm.set_duty_cycle_fully_off()?;
        Ok(led)
    }

    /// Last brightness successfully written.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }
}

impl<PWM: SetDutyCycle> SetBrightness for Led<PWM> {
    type Error = PWM::Error;

    fn set_brightness(&mut self, brightness: u8) -> Result<(), Self::Error> {
        let brightness = brightness.min(MAX_BRIGHTNESS);
        match brightness {
            0 => self.pwm.set_duty_cycle_fully_off()?,
            MAX_BRIGHTNESS => self.pwm.set_duty_cycle_fully_on()?,
            pct => self.pwm.set_duty_cycle_percent(pct)?,
        }
        self.brightness = brightness;
        Ok(())
    }
}

// ------------------------------------------
// On/Off LED
// ------------------------------------------

/// LED on a plain GPIO. Zero is off, any other brightness is on.
pub struct SwitchedLed<PIN>
where
    PIN: OutputPin,
{
    pin: PIN,
    on: bool,
}

impl<PIN: OutputPin> SwitchedLed<PIN> {
    pub fn new(pin: PIN) -> Self {
        Self { pin, on: false }
    }

    pub fn init(pin: PIN) -> Result<Self, PIN::Error> {
        let mut led = Self::new(pin);
        led.pin.set_low()?;
        Ok(led)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl<PIN: OutputPin> SetBrightness for SwitchedLed<PIN> {
    type Error = PIN::Error;

    fn set_brightness(&mut self, brightness: u8) -> Result<(), Self::Error> {
        let on = brightness > 0;
        if on {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.on = on;
        Ok(())
    }
}

// ------------------------------------------
// Function-pointer LED
// ------------------------------------------

/// Capability backed by a bare function, for drivers that live outside Rust
/// or behind a global peripheral.
#[derive(Clone, Copy)]
pub struct FnLed {
    set: fn(u8),
}

impl FnLed {
    pub const fn new(set: fn(u8)) -> Self {
        Self { set }
    }
}

impl SetBrightness for FnLed {
    type Error = Infallible;

    fn set_brightness(&mut self, brightness: u8) -> Result<(), Self::Error> {
        (self.set)(brightness.min(MAX_BRIGHTNESS));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockPin, MockPwm};
    use std::sync::atomic::{AtomicU8, Ordering};

    #[test]
    fn init_turns_pwm_led_off() {
        let pwm = MockPwm::new(1023);
        pwm.duty.set(400);
        let led = Led::init(pwm.clone()).unwrap();
        assert_eq!(pwm.duty.get(), 0);
        assert_eq!(led.brightness(), 0);
    }

    #[test]
    fn brightness_maps_to_duty() {
        let pwm = MockPwm::new(1000);
        let mut led = Led::init(pwm.clone()).unwrap();

        led.set_brightness(50).unwrap();
        assert_eq!(pwm.duty.get(), 500);

        led.set_brightness(99).unwrap();
        assert_eq!(pwm.duty.get(), 990);

        led.set_brightness(100).unwrap();
        assert_eq!(pwm.duty.get(), 1000);
    }

    #[test]
    fn brightness_above_max_is_clamped() {
        let pwm = MockPwm::new(255);
        let mut led = Led::new(pwm.clone());
        led.set_brightness(200).unwrap();
        assert_eq!(pwm.duty.get(), 255);
        assert_eq!(led.brightness(), MAX_BRIGHTNESS);
    }

    #[test]
    fn failed_write_keeps_previous_brightness() {
        let pwm = MockPwm::new(100);
        let mut led = Led::init(pwm.clone()).unwrap();
        led.set_brightness(30).unwrap();

        pwm.fail.set(true);
        assert!(led.set_brightness(70).is_err());
        assert_eq!(led.brightness(), 30);
        assert_eq!(pwm.duty.get(), 30);
    }

    #[test]
    fn switched_led_follows_zero_and_nonzero() {
        let pin = MockPin::new(true);
        let mut led = SwitchedLed::init(pin.clone()).unwrap();
        assert!(!pin.level.get());

        led.set_brightness(1).unwrap();
        assert!(pin.level.get());
        assert!(led.is_on());

        led.set_brightness(0).unwrap();
        assert!(!pin.level.get());
        assert!(!led.is_on());
    }

    static LAST: AtomicU8 = AtomicU8::new(0);

    fn record(brightness: u8) {
        LAST.store(brightness, Ordering::SeqCst);
    }

    #[test]
    fn fn_led_forwards_clamped_value() {
        let mut led = FnLed::new(record);
        led.set_brightness(42).unwrap();
        assert_eq!(LAST.load(Ordering::SeqCst), 42);
        led.set_brightness(250).unwrap();
        assert_eq!(LAST.load(Ordering::SeqCst), MAX_BRIGHTNESS);
    }

    fn dim<L: SetBrightness>(mut led: L) {
        led.set_brightness(10).unwrap();
    }

    #[test]
    fn borrowed_led_is_a_capability_too() {
        let pwm = MockPwm::new(100);
        let mut led = Led::new(pwm.clone());
        dim(&mut led);
        assert_eq!(pwm.duty.get(), 10);
        assert_eq!(led.brightness(), 10);
    }
}
