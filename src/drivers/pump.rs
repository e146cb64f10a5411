//! Pump relay output shared by both pump controllers.
//!
//! ## Safety contract
//!
//! A pump must never run while its interlock probe touches liquid or while
//! it is deactivated.  The controllers ([`ContinuousPump`], [`PulsedPump`])
//! enforce this every tick; this module is the dumb actuator underneath.
//!
//! The relay is re-driven on every tick, so a failed GPIO write heals on
//! the next cycle.
//!
//! [`ContinuousPump`]: super::continuous_pump::ContinuousPump
//! [`PulsedPump`]: super::pulsed_pump::PulsedPump

use core::fmt;

use embedded_hal::digital::OutputPin;

use crate::Millis;
use crate::app::ports::TransitionLog;
use crate::drivers::{Polarity, drive};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Off,
    On,
}

impl fmt::Display for PumpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::On => write!(f, "ON"),
        }
    }
}

/// Operations common to every pump controller.  Advancing differs per
/// controller (each reads a different set of probes), so it lives on the
/// concrete types.
pub trait PumpController {
    /// Enable or disable the pump.  A disabled pump is forced off on its
    /// next advance regardless of timers.
    fn set_active(&mut self, active: bool);

    fn is_active(&self) -> bool;

    fn state(&self) -> PumpState;

    fn is_running(&self) -> bool {
        self.state() == PumpState::On
    }
}

/// Relay pin plus the logical on/off state it reflects.
pub(crate) struct PumpOutput<P, L> {
    name: &'static str,
    pin: P,
    polarity: Polarity,
    state: PumpState,
    log: L,
}

impl<P: OutputPin, L: TransitionLog> PumpOutput<P, L> {
    /// Takes the pin and immediately drives it off.
    pub(crate) fn new(name: &'static str, mut pin: P, polarity: Polarity, log: L) -> Self {
        drive(&mut pin, polarity, false, name);
        Self {
            name,
            pin,
            polarity,
            state: PumpState::Off,
            log,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn state(&self) -> PumpState {
        self.state
    }

    /// Drive the relay to `state`, logging only when it changes.
    pub(crate) fn apply(&mut self, now_ms: Millis, state: PumpState) {
        let previous = self.state;
        self.state = state;
        drive(&mut self.pin, self.polarity, state == PumpState::On, self.name);

        if state != previous {
            self.log.record(
                now_ms,
                self.name,
                format_args!("State has changed to {}", state),
            );
        }
    }

    /// Re-drive the current state (heals a previously failed write).
    pub(crate) fn hold(&mut self, now_ms: Millis) {
        self.apply(now_ms, self.state);
    }
}
