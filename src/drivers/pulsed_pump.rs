//! Duty-cycled pump (wort pump).
//!
//! Alternates between an off phase and an on phase within a fixed
//! [`DUTY_PERIOD_MS`] window.  The interlock probe (boil-kettle level) and
//! the active flag override the cycle and hold the pump off; the phase
//! timestamp is left alone so the cycle resumes where it was.
//!
//! While the interlock touches and the pump is active, the `BoilProbe` alarm
//! pulses on and off every `pulse_ms`.

use log::{debug, warn};

use crate::Millis;
use crate::adapters::log_sink::SerialLog;
use crate::alarm::{AlarmAggregator, AlarmSource};
use crate::app::ports::TransitionLog;
use crate::config::{ControllerConfig, DUTY_PERIOD_MS};
use crate::drivers::Polarity;
use crate::drivers::pump::{PumpController, PumpOutput, PumpState};
use crate::sensors::LiquidProbe;

use embedded_hal::digital::OutputPin;

/// Alarm source pulsed while the boil kettle is full and the pump is active.
pub const BOIL_PROBE_ALARM: AlarmSource = "BoilProbe";

pub struct PulsedPump<P, L = SerialLog> {
    output: PumpOutput<P, L>,
    active: bool,
    on_ms: Millis,
    off_ms: Millis,
    phase_start_ms: Millis,
    pulse_ms: Millis,
    /// `Some(start)` while the alarm is pulsing, with the current half-period start.
    pulse_start_ms: Option<Millis>,
    alarm_phase: bool,
}

impl<P: OutputPin, L: TransitionLog> PulsedPump<P, L> {
    /// Takes `wort_pump_on_ms` and `boil_alarm_pulse_ms` from `config`.
    /// The rest of the duty period is the off phase.  An on-time longer
    /// than the period (which `validate` rejects) is clamped with a warning.
    pub fn new(name: &'static str, pin: P, polarity: Polarity, config: &ControllerConfig, log: L) -> Self {
        let on_ms = if config.wort_pump_on_ms > DUTY_PERIOD_MS {
            warn!(
                "{}: on-time {} ms exceeds the {} ms duty period, clamping",
                name, config.wort_pump_on_ms, DUTY_PERIOD_MS
            );
            DUTY_PERIOD_MS
        } else {
            config.wort_pump_on_ms
        };
        Self {
            output: PumpOutput::new(name, pin, polarity, log),
            active: true,
            on_ms,
            off_ms: DUTY_PERIOD_MS - on_ms,
            phase_start_ms: 0,
            pulse_ms: config.boil_alarm_pulse_ms,
            pulse_start_ms: None,
            alarm_phase: false,
        }
    }

    pub fn on_ms(&self) -> Millis {
        self.on_ms
    }

    pub fn off_ms(&self) -> Millis {
        self.off_ms
    }

    /// Run one control cycle.  `interlock` must already have been advanced
    /// this tick.
    pub fn advance(&mut self, now_ms: Millis, interlock: &impl LiquidProbe, alarms: &mut AlarmAggregator) {
        let blocked = interlock.is_touching() || !self.active;
        let elapsed = now_ms.saturating_sub(self.phase_start_ms);

        match self.output.state() {
            _ if blocked => self.output.apply(now_ms, PumpState::Off),
            PumpState::Off if elapsed >= self.off_ms => {
                self.phase_start_ms = now_ms;
                self.output.apply(now_ms, PumpState::On);
            }
            PumpState::On if elapsed >= self.on_ms => {
                self.phase_start_ms = now_ms;
                self.output.apply(now_ms, PumpState::Off);
            }
            _ => self.output.hold(now_ms),
        }

        self.pulse_alarm(now_ms, interlock.is_touching() && self.active, alarms);
    }

    fn pulse_alarm(&mut self, now_ms: Millis, alarming: bool, alarms: &mut AlarmAggregator) {
        if !alarming {
            self.pulse_start_ms = None;
            self.alarm_phase = false;
            alarms.clear(BOIL_PROBE_ALARM);
            return;
        }

        match self.pulse_start_ms {
            None => {
                self.pulse_start_ms = Some(now_ms);
                self.alarm_phase = true;
            }
            Some(start) if now_ms.saturating_sub(start) >= self.pulse_ms => {
                self.pulse_start_ms = Some(now_ms);
                self.alarm_phase = !self.alarm_phase;
                debug!("{}: alarm pulse {}", self.output.name(), self.alarm_phase);
            }
            Some(_) => {}
        }
        alarms.set(BOIL_PROBE_ALARM, self.alarm_phase);
    }
}

impl<P: OutputPin, L: TransitionLog> PumpController for PulsedPump<P, L> {
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
