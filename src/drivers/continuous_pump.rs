//! Continuous-flow pump (sparge water pump).
//!
//! Runs whenever its interlock probe (mash probe) is clear, but only after
//! the probe has stayed clear for a minimum re-enable delay.  This keeps the
//! pump from chattering as the liquid surface ripples around the probe tip.
//!
//! ```text
//!            interlock touching / inactive
//!   ┌────────────────────────────────────────────┐
//!   ▼                                            │
//!  OFF ── clear for >= delay ──▶ ON ─────────────┘
//! ```
//!
//! Independently of the pump state, a second (high-level) probe raises the
//! `MashProbeHigh` alarm while it touches and the pump is active.

use crate::Millis;
use crate::adapters::log_sink::SerialLog;
use crate::alarm::{AlarmAggregator, AlarmSource};
use crate::app::ports::TransitionLog;
use crate::drivers::Polarity;
use crate::drivers::pump::{PumpController, PumpOutput, PumpState};
use crate::sensors::LiquidProbe;

use embedded_hal::digital::OutputPin;

/// Alarm source raised by the high-level mash probe.
pub const MASH_HIGH_ALARM: AlarmSource = "MashProbeHigh";

pub struct ContinuousPump<P, L = SerialLog> {
    output: PumpOutput<P, L>,
    active: bool,
    delay_ms: Millis,
    /// Start of the current clear period (or the last on-refresh).
    last_change_ms: Millis,
    /// True while the interlock (or the override) held the pump off on the
    /// previous tick.
    held_off: bool,
}

impl<P: OutputPin, L: TransitionLog> ContinuousPump<P, L> {
    pub fn new(name: &'static str, pin: P, polarity: Polarity, delay_ms: Millis, log: L) -> Self {
        Self {
            output: PumpOutput::new(name, pin, polarity, log),
            active: true,
            delay_ms,
            last_change_ms: 0,
            held_off: false,
        }
    }

    pub fn delay_ms(&self) -> Millis {
        self.delay_ms
    }

    /// Run one control cycle.
    ///
    /// `interlock` must already have been advanced this tick; `high` is the
    /// overflow probe that drives the `MashProbeHigh` alarm.
    pub fn advance(
        &mut self,
        now_ms: Millis,
        interlock: &impl LiquidProbe,
        high: &impl LiquidProbe,
        alarms: &mut AlarmAggregator,
    ) {
        if interlock.is_touching() || !self.active {
            self.held_off = true;
            self.last_change_ms = now_ms;
            self.output.apply(now_ms, PumpState::Off);
        } else {
            if self.held_off {
                // The delay counts from the first clear tick.
                self.held_off = false;
                self.last_change_ms = now_ms;
            }
            if now_ms.saturating_sub(self.last_change_ms) >= self.delay_ms {
                self.last_change_ms = now_ms;
                self.output.apply(now_ms, PumpState::On);
            } else {
                self.output.hold(now_ms);
            }
        }

        alarms.set(MASH_HIGH_ALARM, high.is_touching() && self.active);
    }
}

impl<P: OutputPin, L: TransitionLog> PumpController for ContinuousPump<P, L> {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn state(&self) -> PumpState {
        self.output.state()
    }
}
