use core::fmt::Write;

use bitmask_enum::bitmask;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{debug, info, warn};

use crate::components::alarm::Alarm;
use crate::components::button::Button;
use crate::components::ldr::{Ldr, OneShot};
use crate::components::led::{SetBrightness, MAX_BRIGHTNESS};
use crate::config::Config;
use crate::console::{self, Event, LineDecoder, Target, LINE_CAPACITY};
use crate::error::{Error, Result};
use crate::status::Status;

/// Buttons that produced a new press during one poll.
#[bitmask(u8)]
pub enum Presses {
    Led,
    HighLimit,
    LowLimit,
}

/// Raw peripherals handed to the [`Controller`].
pub struct Parts<LED, ALARM, BTN, ADC> {
    pub led: LED,
    pub alarm: ALARM,
    pub led_button: BTN,
    pub high_button: BTN,
    pub low_button: BTN,
    pub ldr: ADC,
}

/// Ties the LED, light sensor, buttons and console together.
pub struct Controller<LED, ALARM, BTN, ADC>
where
    LED: SetBrightness,
    ALARM: OutputPin,
    BTN: InputPin,
    ADC: OneShot,
{
    led: LED,
    alarm: Alarm<ALARM>,
    led_button: Button<BTN>,
    high_button: Button<BTN>,
    low_button: Button<BTN>,
    ldr: Ldr<ADC>,
    brightness: u8,
    high_limit: u8,
    low_limit: u8,
    selected: Option<Target>,
    decoder: LineDecoder<LINE_CAPACITY>,
}

impl<LED, ALARM, BTN, ADC> Controller<LED, ALARM, BTN, ADC>
where
    LED: SetBrightness,
    ALARM: OutputPin,
    BTN: InputPin,
    ADC: OneShot,
{
    /// Validate `config`, switch the LED off and clear the alarm.
    pub fn new(parts: Parts<LED, ALARM, BTN, ADC>, config: Config) -> Result<Self> {
        config.validate()?;

        let mut led = parts.led;
        led.set_brightness(0).map_err(|e| {
            warn!("LED init failed: {:?}", e);
            Error::Led
        })?;
        let alarm = Alarm::init(parts.alarm).map_err(|_| Error::Alarm)?;

        let active_low = config.button_active_low;
        Ok(Self {
            led,
            alarm,
            led_button: Button::new(parts.led_button, active_low),
            high_button: Button::new(parts.high_button, active_low),
            low_button: Button::new(parts.low_button, active_low),
            ldr: Ldr::new(parts.ldr, config.ldr_full_scale),
            brightness: 0,
            high_limit: config.high_limit,
            low_limit: config.low_limit,
            selected: None,
            decoder: LineDecoder::new(),
        })
    }

    /// Announce the console is ready.
    pub fn start<W: Write>(&mut self, out: &mut W) -> Result<()> {
        info!(
            "controller ready, limits {}..={}",
            self.low_limit, self.high_limit
        );
        console::ready(out)?;
        Ok(())
    }

    /// One pass of the main loop: buttons, then the alarm.
    pub fn tick<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.poll_buttons(out)?;
        self.update_alarm()?;
        Ok(())
    }

    /// Check the buttons and echo new presses. The last press wins the selection.
    ///
    /// All three are read before any press is recorded, so a failed read
    /// leaves every button's state untouched.
    pub fn poll_buttons<W: Write>(&mut self, out: &mut W) -> Result<Presses> {
        let led = self.led_button.is_pressed().map_err(|_| Error::Button)?;
        let high = self.high_button.is_pressed().map_err(|_| Error::Button)?;
        let low = self.low_button.is_pressed().map_err(|_| Error::Button)?;

        let mut presses = Presses::none();
        if self.led_button.record(led) {
            presses |= Presses::Led;
        }
        if self.high_button.record(high) {
            presses |= Presses::HighLimit;
        }
        if self.low_button.record(low) {
            presses |= Presses::LowLimit;
        }

        for (flag, target) in [
            (Presses::Led, Target::Brightness),
            (Presses::HighLimit, Target::HighLimit),
            (Presses::LowLimit, Target::LowLimit),
        ] {
            if presses.contains(flag) {
                debug!("{} pressed", target.button_label());
                self.selected = Some(target);
                console::pressed(out, target)?;
            }
        }
        Ok(presses)
    }

    pub fn handle_bytes<W: Write>(&mut self, bytes: &[u8], out: &mut W) -> Result<()> {
        bytes.iter().try_for_each(|&b| self.handle_byte(b, out))
    }

    /// Feed one byte received on the console.
    pub fn handle_byte<W: Write>(&mut self, byte: u8, out: &mut W) -> Result<()> {
        match self.decoder.feed(byte) {
            None => Ok(()),
            Some(Event::Query) => {
                let status = self.status()?;
                console::line(out, format_args!("{}", status))?;
                Ok(())
            }
            Some(Event::Malformed) => {
                debug!("malformed console line");
                console::ignored(out, "expected a number")?;
                Ok(())
            }
            Some(Event::Value(value)) => self.handle_value(value, out),
        }
    }

    fn handle_value<W: Write>(&mut self, value: u16, out: &mut W) -> Result<()> {
        console::received(out, value)?;
        let Some(target) = self.selected.take() else {
            console::ignored(out, "press a button first")?;
            return Ok(());
        };

        match self.apply(target, value) {
            Ok(()) => console::updated(out, target)?,
            Err(err) if err.is_rejection() => {
                warn!("rejected {}: {}", target.label(), err);
                console::rejected(out, target, &err)?;
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    /// Change one setting directly, with the same checks the console applies.
    pub fn apply(&mut self, target: Target, value: u16) -> Result<()> {
        let pct = match u8::try_from(value) {
            Ok(v) if v <= MAX_BRIGHTNESS => v,
            _ => return Err(Error::OutOfRange { target, value }),
        };

        match target {
            Target::Brightness => {
                self.led.set_brightness(pct).map_err(|e| {
                    warn!("LED write failed: {:?}", e);
                    Error::Led
                })?;
                self.brightness = pct;
            }
            Target::HighLimit => {
                if pct < self.low_limit {
                    return Err(Error::InvalidLimits {
                        low: self.low_limit,
                        high: pct,
                    });
                }
                self.high_limit = pct;
            }
            Target::LowLimit => {
                if pct > self.high_limit {
                    return Err(Error::InvalidLimits {
                        low: pct,
                        high: self.high_limit,
                    });
                }
                self.low_limit = pct;
            }
        }
        info!("{} set to {}", target.label(), pct);
        if target != Target::Brightness {
            self.update_alarm()?;
        }
        Ok(())
    }

    /// Read the light level and drive the alarm. Returns whether it is active.
    pub fn update_alarm(&mut self) -> Result<bool> {
        let level = self.ldr.read_level();
        self.drive_alarm(level)
    }

    fn drive_alarm(&mut self, level: u8) -> Result<bool> {
        let active = level > self.high_limit || level < self.low_limit;
        let changed = self.alarm.set(active).map_err(|_| Error::Alarm)?;
        if changed {
            if active {
                warn!(
                    "light level {} outside {}..={}",
                    level, self.low_limit, self.high_limit
                );
            } else {
                info!("light level {} back within limits", level);
            }
        }
        Ok(active)
    }

    /// Current settings with a fresh LDR reading. The alarm output is
    /// driven from that same reading, so the reported state matches the pin.
    pub fn status(&mut self) -> Result<Status> {
        let ldr = self.ldr.read_raw();
        let level = self.ldr.level(ldr);
        let alarm = self.drive_alarm(level)?;
        Ok(Status {
            ldr,
            brightness: self.brightness,
            high_limit: self.high_limit,
            low_limit: self.low_limit,
            alarm,
        })
    }

    pub fn selected(&self) -> Option<Target> {
        self.selected
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn limits(&self) -> (u8, u8) {
        (self.low_limit, self.high_limit)
    }
}
