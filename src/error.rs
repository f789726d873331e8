use core::fmt;

use crate::console::Target;

/// Everything that can go wrong driving the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The LED driver rejected a write.
    Led,
    /// The alarm output could not be driven.
    Alarm,
    /// A button could not be read.
    Button,
    /// The console sink refused output.
    Output,
    /// A console value outside 0..=100.
    OutOfRange { target: Target, value: u16 },
    /// A limit change that would put the low limit above the high one.
    InvalidLimits { low: u8, high: u8 },
    /// A [`Config`](crate::Config) with limits above 100 or a zero full scale.
    InvalidConfig,
}

impl Error {
    /// Rejections are reported on the console; everything else is a fault.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::OutOfRange { .. } | Error::InvalidLimits { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Led => write!(f, "LED write failed"),
            Error::Alarm => write!(f, "alarm output failed"),
            Error::Button => write!(f, "button read failed"),
            Error::Output => write!(f, "console write failed"),
            Error::OutOfRange { value, .. } => write!(f, "{} is out of range 0..=100", value),
            Error::InvalidLimits { low, high } => {
                write!(f, "low limit {} above high limit {}", low, high)
            }
            Error::InvalidConfig => write!(f, "invalid configuration"),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::Output
    }
}

pub type Result<T> = core::result::Result<T, Error>;
