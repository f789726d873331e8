use embedded_hal::digital::OutputPin;

/// Alarm indicator on a GPIO, lit while active.
pub struct Alarm<PIN>
where
    PIN: OutputPin,
{
    pin: PIN,
    active: bool,
}

impl<PIN: OutputPin> Alarm<PIN> {
    /// Takes the pin and drives it low.
    pub fn init(mut pin: PIN) -> Result<Self, PIN::Error> {
        pin.set_low()?;
        Ok(Self { pin, active: false })
    }

    /// Drive the indicator. The pin is only written when the state changes.
    /// Returns true if it did change.
    pub fn set(&mut self, active: bool) -> Result<bool, PIN::Error> {
        if active == self.active {
            return Ok(false);
        }
        if active {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.active = active;
        Ok(true)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPin;

    #[test]
    fn writes_only_on_change() {
        let pin = MockPin::new(true);
        let mut alarm = Alarm::init(pin.clone()).unwrap();
        assert!(!pin.level.get());
        assert_eq!(pin.writes.get(), 1);

        assert!(!alarm.set(false).unwrap());
        assert_eq!(pin.writes.get(), 1);

        assert!(alarm.set(true).unwrap());
        assert!(alarm.set(true).is_ok());
        assert!(pin.level.get());
        assert!(alarm.is_active());
        assert_eq!(pin.writes.get(), 2);
    }

    #[test]
    fn failed_write_leaves_state_unchanged() {
        let pin = MockPin::new(false);
        let mut alarm = Alarm::init(pin.clone()).unwrap();
        pin.fail.set(true);
        assert!(alarm.set(true).is_err());
        assert!(!alarm.is_active());
    }
}
