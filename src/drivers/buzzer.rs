//! Buzzer driven from an [`AlarmAggregator`].
//!
//! Sounds while any alarm source is raised.  The output is re-driven every
//! tick; only silent/sounding transitions are logged.

use core::fmt;

use embedded_hal::digital::OutputPin;

use crate::Millis;
use crate::adapters::log_sink::SerialLog;
use crate::alarm::AlarmAggregator;
use crate::app::ports::TransitionLog;
use crate::drivers::{Polarity, drive};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding,
}

impl fmt::Display for BuzzerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent => write!(f, "SILENT"),
            Self::Sounding => write!(f, "SOUNDING"),
        }
    }
}

pub struct Buzzer<P, L = SerialLog> {
    name: &'static str,
    pin: P,
    polarity: Polarity,
    state: BuzzerState,
    log: L,
}

impl<P: OutputPin, L: TransitionLog> Buzzer<P, L> {
    /// Takes the pin and drives it silent.
    pub fn new(name: &'static str, mut pin: P, polarity: Polarity, log: L) -> Self {
        drive(&mut pin, polarity, false, name);
        Self {
            name,
            pin,
            polarity,
            state: BuzzerState::Silent,
            log,
        }
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        self.state == BuzzerState::Sounding
    }

    pub fn advance(&mut self, now_ms: Millis, alarms: &AlarmAggregator) {
        let state = if alarms.is_active() {
            BuzzerState::Sounding
        } else {
            BuzzerState::Silent
        };
        drive(&mut self.pin, self.polarity, state == BuzzerState::Sounding, self.name);

        if state != self.state {
            self.state = state;
            self.log
                .record(now_ms, self.name, format_args!("State has changed to {}", state));
        }
    }
}
