//! Serial console: byte-wise input decoding and the fixed response lines.
//!
//! Input is either a single `?` (status query, no newline needed) or a
//! decimal value terminated by `\n`. Output lines end in `\r\n`.

use core::fmt::{self, Write};

use heapless::String;

use crate::error::Error;

/// Longest accepted input line, excluding the terminator.
pub const LINE_CAPACITY: usize = 16;

/// The setting a console value is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Brightness,
    HighLimit,
    LowLimit,
}

impl Target {
    /// Name echoed when the selecting button is pressed.
    pub fn button_label(self) -> &'static str {
        match self {
            Target::Brightness => "LED Control",
            Target::HighLimit => "High Limit",
            Target::LowLimit => "Low Limit",
        }
    }

    /// Name used in update and reject messages.
    pub fn label(self) -> &'static str {
        match self {
            Target::Brightness => "Brightness",
            Target::HighLimit => "High Limit",
            Target::LowLimit => "Low Limit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Query,
    Value(u16),
    Malformed,
}

pub struct LineDecoder<const N: usize> {
    line: String<N>,
    discard: bool,
}

impl<const N: usize> Default for LineDecoder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineDecoder<N> {
    pub const fn new() -> Self {
        Self {
            line: String::new(),
            discard: false,
        }
    }

    /// Feed one received byte. Returns an event once one is complete.
    pub fn feed(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'?' => {
                self.reset();
                Some(Event::Query)
            }
            b'\r' => None,
            b'\n' => {
                let event = self.finish();
                self.reset();
                event
            }
            _ => {
                if !self.discard && (!byte.is_ascii() || self.line.push(byte as char).is_err()) {
                    self.discard = true;
                }
                None
            }
        }
    }

    /// Drop any partially received line.
    pub fn reset(&mut self) {
        self.line.clear();
        self.discard = false;
    }

    fn finish(&self) -> Option<Event> {
        if self.discard {
            return Some(Event::Malformed);
        }
        let text = self.line.trim();
        if text.is_empty() {
            return None;
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Some(Event::Malformed);
        }
        Some(text.parse().map(Event::Value).unwrap_or(Event::Malformed))
    }
}

// ------------------------------------------
// Response lines
// ------------------------------------------

pub(crate) fn line<W: Write>(out: &mut W, args: fmt::Arguments) -> fmt::Result {
    out.write_fmt(args)?;
    out.write_str("\r\n")
}

pub(crate) fn ready<W: Write>(out: &mut W) -> fmt::Result {
    line(out, format_args!("Ready"))
}

pub(crate) fn pressed<W: Write>(out: &mut W, target: Target) -> fmt::Result {
    line(out, format_args!("{}: Pressed", target.button_label()))
}

pub(crate) fn received<W: Write>(out: &mut W, value: u16) -> fmt::Result {
    line(out, format_args!("Received: {}", value))
}

pub(crate) fn updated<W: Write>(out: &mut W, target: Target) -> fmt::Result {
    line(out, format_args!("-> Updated {}", target.label()))
}

pub(crate) fn rejected<W: Write>(out: &mut W, target: Target, reason: &Error) -> fmt::Result {
    line(out, format_args!("-> Rejected {}: {}", target.label(), reason))
}

pub(crate) fn ignored<W: Write>(out: &mut W, reason: &str) -> fmt::Result {
    line(out, format_args!("-> Ignored: {}", reason))
}
