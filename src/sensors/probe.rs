//! Binary liquid-contact probe (mash tun, kettle, high-level probes).
//!
//! A conductive probe pulls its input pin to the asserted level while it is
//! in contact with liquid.  The probe keeps only the current state; the
//! previous one is used to log transitions.
//!
//! A pin that cannot be read counts as touching, so a dependent pump stays
//! off until the probe is readable again.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::Millis;
use crate::adapters::log_sink::SerialLog;
use crate::app::ports::TransitionLog;
use crate::drivers::{Polarity, read_asserted};
use crate::error::{Error, PinError};
use crate::sensors::{DisplayText, LiquidProbe, ProbeState};

pub struct DigitalProbe<P, L = SerialLog> {
    name: &'static str,
    pin: P,
    polarity: Polarity,
    state: ProbeState,
    read_fault: bool,
    log: L,
}

impl<P: InputPin, L: TransitionLog> DigitalProbe<P, L> {
    pub fn new(name: &'static str, pin: P, polarity: Polarity, log: L) -> Self {
        Self {
            name,
            pin,
            polarity,
            state: ProbeState::Clear,
            read_fault: false,
            log,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    /// Update from an already-sampled contact level.
    pub fn sample(&mut self, now_ms: Millis, contact: bool) {
        let previous = self.state;
        self.state = ProbeState::from_contact(contact);

        if self.state != previous {
            self.log.record(
                now_ms,
                self.name,
                format_args!("State has changed to {}", self.state),
            );
        }
    }
}

impl<P: InputPin, L: TransitionLog> LiquidProbe for DigitalProbe<P, L> {
    fn advance(&mut self, now_ms: Millis) {
        let contact = match read_asserted(&mut self.pin, self.polarity) {
            Some(contact) => {
                self.read_fault = false;
                contact
            }
            None => {
                if !self.read_fault {
                    warn!("{}: {}, assuming liquid", self.name, Error::from(PinError::ReadFailed));
                }
                self.read_fault = true;
                true
            }
        };
        self.sample(now_ms, contact);
    }

    fn is_touching(&self) -> bool {
        self.state.is_touching()
    }

    fn display(&self) -> DisplayText {
        DisplayText::new()
    }
}
