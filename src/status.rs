use core::fmt;
use core::str::FromStr;

const PREFIX: &str = "STATUS:";

/// Snapshot reported in answer to a `?` query.
///
/// Rendered as `STATUS: LDR=<raw> BRT=<pct> HL=<pct> LL=<pct> ALARM=<0|1>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Raw LDR reading.
    pub ldr: u16,
    pub brightness: u8,
    pub high_limit: u8,
    pub low_limit: u8,
    pub alarm: bool,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} LDR={} BRT={} HL={} LL={} ALARM={}",
            PREFIX,
            self.ldr,
            self.brightness,
            self.high_limit,
            self.low_limit,
            u8::from(self.alarm)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatusError {
    MissingPrefix,
    MissingField(&'static str),
    BadValue(&'static str),
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseStatusError::MissingPrefix => write!(f, "line does not start with {}", PREFIX),
            ParseStatusError::MissingField(key) => write!(f, "missing field {}", key),
            ParseStatusError::BadValue(key) => write!(f, "bad value for {}", key),
        }
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if !line.starts_with(PREFIX) {
            return Err(ParseStatusError::MissingPrefix);
        }

        fn get<T: TryFrom<u32>>(line: &str, key: &'static str) -> Result<T, ParseStatusError> {
            let raw = raw_field(line, key).ok_or(ParseStatusError::MissingField(key))?;
            raw.parse::<u32>()
                .ok()
                .and_then(|v| T::try_from(v).ok())
                .ok_or(ParseStatusError::BadValue(key))
        }

        let alarm: u8 = get(line, "ALARM")?;
        if alarm > 1 {
            return Err(ParseStatusError::BadValue("ALARM"));
        }

        Ok(Status {
            ldr: get(line, "LDR")?,
            brightness: get(line, "BRT")?,
            high_limit: get(line, "HL")?,
            low_limit: get(line, "LL")?,
            alarm: alarm == 1,
        })
    }
}

/// Pull a single numeric `KEY=value` field out of a status line.
pub fn field(line: &str, key: &str) -> Option<u32> {
    raw_field(line, key)?.parse().ok()
}

fn raw_field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.split_whitespace().find_map(|part| {
        let (k, v) = part.split_once('=')?;
        (k == key).then_some(v)
    })
}
