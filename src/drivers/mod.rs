//! Actuator and input drivers: pumps, buttons, buzzer, plus the shared
//! pin-level helpers they use.
//!
//! Every driver owns its `embedded-hal` pins and is advanced once per tick
//! with the loop's timestamp.  Pin failures never propagate out of a tick:
//! writes are logged and retried on the next tick (every driver re-drives
//! its output each cycle), reads fall back to the caller's safe level.

pub mod button;
pub mod buzzer;
pub mod continuous_pump;
pub mod pulsed_pump;
pub mod pump;

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::error::{Error, PinError};

/// Electrical level that means "asserted" for a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// HIGH = asserted (probe touching, relay energised, buzzer sounding).
    #[default]
    ActiveHigh,
    /// LOW = asserted (button to ground with pull-up, low-side relay board).
    ActiveLow,
}

impl Polarity {
    /// Map a raw electrical level to a logical "asserted" value.
    pub fn asserted(self, high: bool) -> bool {
        match self {
            Self::ActiveHigh => high,
            Self::ActiveLow => !high,
        }
    }
}

/// Sample an input pin.  Read failures return `None`; the caller decides
/// which logical value is safe.
pub(crate) fn read_asserted(pin: &mut impl InputPin, polarity: Polarity) -> Option<bool> {
    pin.is_high().ok().map(|high| polarity.asserted(high))
}

/// Drive an output pin to a logical state, logging (not propagating) a failure.
pub(crate) fn drive(pin: &mut impl OutputPin, polarity: Polarity, on: bool, owner: &str) {
    let high = polarity.asserted(on);
    let result = if high { pin.set_high() } else { pin.set_low() };
    if result.is_err() {
        warn!("{}: {}", owner, Error::from(PinError::WriteFailed));
    }
}
