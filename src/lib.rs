#![cfg_attr(not(test), no_std)]
//! # uFerris Light Crate
//!
//! Drives a dimmable LED on the uFerris carrier board and watches an LDR against
//! a configurable light window, with a small serial console to change settings.
//!
//! Every LED driver exposes one capability, [`SetBrightness`]. The
//! [`Controller`] combines it with the LDR, three selection buttons and an
//! alarm output. Boards are enabled through features, e.g. `xiao-esp32c3`.

mod components;
pub mod config;
pub mod console;
mod controller;
mod error;
pub mod status;

#[cfg(test)]
mod mock;

// Export the specific board implementation based on features
pub mod boards;

pub use components::alarm::Alarm;
pub use components::button::Button;
pub use components::ldr::{Ldr, OneShot};
pub use components::led::{FnLed, Led, SetBrightness, SwitchedLed, MAX_BRIGHTNESS};
pub use config::Config;
pub use console::{Event, LineDecoder, Target};
pub use controller::{Controller, Parts, Presses};
pub use error::{Error, Result};
pub use status::Status;
