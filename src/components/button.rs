use embedded_hal::digital::InputPin;

/// Push button with press-edge detection.
pub struct Button<PIN>
where
    PIN: InputPin,
{
    pin: PIN,
    active_low: bool,
    was_pressed: bool,
}

impl<PIN: InputPin> Button<PIN> {
    /// `active_low` is true for buttons that pull the line to ground.
    pub fn new(pin: PIN, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            was_pressed: false,
        }
    }

    /// Current level of the button, without edge tracking.
    pub fn is_pressed(&mut self) -> Result<bool, PIN::Error> {
        if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        }
    }

    /// Returns true exactly once for each press.
    pub fn poll(&mut self) -> Result<bool, PIN::Error> {
        let pressed = self.is_pressed()?;
        Ok(self.record(pressed))
    }

    /// Record a level read with [`is_pressed`](Self::is_pressed) and report
    /// whether it starts a new press.
    pub fn record(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        edge
    }
}
