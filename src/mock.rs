//! In-memory stand-ins for board peripherals. Clones share state, so a test
//! can hand one copy to a driver and inspect the other.

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{self, ErrorType as DigitalErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, ErrorType as PwmErrorType, SetDutyCycle};

use crate::components::ldr::OneShot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl digital::Error for MockError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl pwm::Error for MockError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

#[derive(Clone, Default)]
pub struct MockPin {
    pub level: Rc<Cell<bool>>,
    pub writes: Rc<Cell<usize>>,
    pub fail: Rc<Cell<bool>>,
}

impl MockPin {
    pub fn new(level: bool) -> Self {
        let pin = Self::default();
        pin.level.set(level);
        pin
    }

    fn write(&mut self, level: bool) -> Result<(), MockError> {
        if self.fail.get() {
            return Err(MockError);
        }
        self.level.set(level);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl DigitalErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail.get() {
            return Err(MockError);
        }
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[derive(Clone)]
pub struct MockPwm {
    pub duty: Rc<Cell<u16>>,
    pub fail: Rc<Cell<bool>>,
    max: u16,
}

impl MockPwm {
    pub fn new(max: u16) -> Self {
        Self {
            duty: Rc::new(Cell::new(0)),
            fail: Rc::new(Cell::new(false)),
            max,
        }
    }
}

impl PwmErrorType for MockPwm {
    type Error = MockError;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail.get() {
            return Err(MockError);
        }
        self.duty.set(duty);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockAdc {
    pub value: Rc<Cell<u16>>,
    pub reads: Rc<Cell<usize>>,
}

impl MockAdc {
    pub fn new(value: u16) -> Self {
        let adc = Self::default();
        adc.value.set(value);
        adc
    }
}

impl OneShot for MockAdc {
    fn read_raw(&mut self) -> u16 {
        self.reads.set(self.reads.get() + 1);
        self.value.get()
    }
}
