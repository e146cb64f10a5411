//! Liquid-contact probes.
//!
//! Every probe exposes the same capability set through [`LiquidProbe`]:
//! advance from its raw input, report contact, and render a short display
//! value.  Two implementations exist:
//!
//! | Probe           | Input                    | Touching when                  |
//! |-----------------|--------------------------|--------------------------------|
//! | [`DigitalProbe`]| binary contact pin       | pin asserted                   |
//! | [`LevelSensor`] | pressure transducer      | level >= active boil stop, or  |
//! |                 |                          | uncalibrated (fail-safe)       |
//!
//! Probes are advanced first in every tick; pumps and alarms read them
//! afterwards through a shared borrow.

pub mod level;
pub mod probe;

use core::fmt;

pub use level::LevelSensor;
pub use probe::DigitalProbe;

use crate::Millis;

/// Short text for the front-panel display.
pub type DisplayText = heapless::String<16>;

/// Contact state of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Clear,
    Touching,
}

impl ProbeState {
    pub fn from_contact(touching: bool) -> Self {
        if touching { Self::Touching } else { Self::Clear }
    }

    pub fn is_touching(self) -> bool {
        self == Self::Touching
    }
}

impl fmt::Display for ProbeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => write!(f, "CLEAR"),
            Self::Touching => write!(f, "TOUCH LIQUID"),
        }
    }
}

/// Capability set shared by every liquid probe.
pub trait LiquidProbe {
    /// Pull the latest raw input and update internal state.
    fn advance(&mut self, now_ms: Millis);

    /// True when liquid is present (or presence cannot be ruled out).
    fn is_touching(&self) -> bool;

    /// Value to show on the display; empty when the probe has none.
    fn display(&self) -> DisplayText;
}
