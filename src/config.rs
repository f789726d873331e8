use crate::error::{Error, Result};

/// Raw reading of a 12-bit ADC at full light.
pub const DEFAULT_LDR_FULL_SCALE: u16 = 4095;
pub const DEFAULT_HIGH_LIMIT: u8 = 80;
pub const DEFAULT_LOW_LIMIT: u8 = 20;

/// Start-up settings for the [`Controller`](crate::Controller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Alarm when the light level rises above this percent.
    pub high_limit: u8,
    /// Alarm when the light level falls below this percent.
    pub low_limit: u8,
    pub ldr_full_scale: u16,
    pub button_active_low: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            high_limit: DEFAULT_HIGH_LIMIT,
            low_limit: DEFAULT_LOW_LIMIT,
            ldr_full_scale: DEFAULT_LDR_FULL_SCALE,
            button_active_low: true,
        }
    }
}

impl Config {
    pub fn with_limits(mut self, low: u8, high: u8) -> Self {
        self.low_limit = low;
        self.high_limit = high;
        self
    }

    pub fn with_ldr_full_scale(mut self, full_scale: u16) -> Self {
        self.ldr_full_scale = full_scale;
        self
    }

    pub fn with_button_active_low(mut self, active_low: bool) -> Self {
        self.button_active_low = active_low;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.high_limit > 100 || self.low_limit > 100 || self.ldr_full_scale == 0 {
            return Err(Error::InvalidConfig);
        }
        if self.low_limit > self.high_limit {
            return Err(Error::InvalidLimits {
                low: self.low_limit,
                high: self.high_limit,
            });
        }
        Ok(())
    }
}
