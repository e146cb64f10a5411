//! Boil-kettle level sensor derived from a pressure transducer.
//!
//! The transducer sits at the bottom of the kettle; hydrostatic pressure
//! above the empty-kettle "zero" is proportional to volume.  The sensor keeps
//! a fixed-size ring buffer of raw readings and works from its average:
//!
//! ```text
//! level_gal = (average - zero) / level_scale
//! ```
//!
//! ## Calibration
//!
//! The zero is learned, not configured: after the transducer reports
//! connected, the first [`WINDOW`] samples are collected and their average
//! becomes the zero.  A disconnected status discards the zero, and the next
//! reconnect recalibrates from scratch.  A non-finite reading counts as a
//! disconnect.
//!
//! While uncalibrated the sensor reports touching, so the wort pump cannot
//! run blind.

use core::fmt::Write;

use log::warn;

use crate::Millis;
use crate::adapters::log_sink::SerialLog;
use crate::app::ports::{PressureTransducer, TransitionLog};
use crate::config::{BoilSettings, ControllerConfig, DisplayUnits};
use crate::sensors::{DisplayText, LiquidProbe, ProbeState};

/// Samples in the averaging ring buffer (and in the calibration window).
pub const WINDOW: usize = 20;

const UNCALIBRATED_TEXT: &str = "----";

pub struct LevelSensor<'a, T, L = SerialLog> {
    name: &'static str,
    transducer: T,
    settings: &'a BoilSettings,
    level_scale: f32,
    ring: [f32; WINDOW],
    head: usize,
    /// Connected samples collected towards the current calibration.
    calibration_count: usize,
    zero: Option<f32>,
    /// Contact state at the end of the previous advance, for logging.
    last_state: ProbeState,
    log: L,
}

impl<'a, T: PressureTransducer, L: TransitionLog> LevelSensor<'a, T, L> {
    pub fn new(
        name: &'static str,
        transducer: T,
        settings: &'a BoilSettings,
        config: &ControllerConfig,
        log: L,
    ) -> Self {
        Self {
            name,
            transducer,
            settings,
            level_scale: config.level_scale,
            ring: [0.0; WINDOW],
            head: 0,
            calibration_count: 0,
            zero: None,
            last_state: ProbeState::Touching,
            log,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.zero.is_some()
    }

    /// Calibrated zero (average pressure of the empty kettle).
    pub fn zero(&self) -> Option<f32> {
        self.zero
    }

    /// Mean of the ring buffer.
    pub fn average(&self) -> f32 {
        self.ring.iter().sum::<f32>() / WINDOW as f32
    }

    /// Pressure above the calibrated zero.
    pub fn pressure_delta(&self) -> Option<f32> {
        self.zero.map(|zero| self.average() - zero)
    }

    /// Estimated kettle volume.
    pub fn level_gal(&self) -> Option<f32> {
        self.pressure_delta().map(|delta| delta / self.level_scale)
    }

    fn push_reading(&mut self, reading: f32) {
        self.ring[self.head] = reading;
        self.head = (self.head + 1) % WINDOW;
    }

    fn on_connected(&mut self, now_ms: Millis, reading: f32) {
        self.push_reading(reading);

        if self.zero.is_none() {
            self.calibration_count += 1;
            if self.calibration_count >= WINDOW {
                let zero = self.average();
                self.zero = Some(zero);
                self.log.record(
                    now_ms,
                    self.name,
                    format_args!("Connected - zero set to {:.2}", zero),
                );
            }
        }
    }

    fn on_disconnected(&mut self, now_ms: Millis) {
        if self.zero.take().is_some() {
            self.log
                .record(now_ms, self.name, format_args!("Disconnected - recalibrating"));
        } else if self.calibration_count > 0 {
            warn!("{}: lost connection during calibration", self.name);
        }
        self.calibration_count = 0;
    }
}

impl<T: PressureTransducer, L: TransitionLog> LiquidProbe for LevelSensor<'_, T, L> {
    fn advance(&mut self, now_ms: Millis) {
        match self.transducer.poll() {
            Some(sample) if sample.is_connected() && sample.pressure.is_finite() => {
                self.on_connected(now_ms, sample.pressure);
            }
            Some(sample) => {
                if sample.is_connected() {
                    warn!("{}: non-finite pressure reading, treating as disconnected", self.name);
                }
                self.on_disconnected(now_ms);
            }
            None => {}
        }

        let state = ProbeState::from_contact(self.is_touching());
        if state != self.last_state {
            self.log
                .record(now_ms, self.name, format_args!("State has changed to {}", state));
            self.last_state = state;
        }
    }

    fn is_touching(&self) -> bool {
        match self.level_gal() {
            Some(level) => level >= self.settings.active_threshold_gal(),
            None => true,
        }
    }

    fn display(&self) -> DisplayText {
        let mut text = DisplayText::new();
        let written = match (self.pressure_delta(), self.level_gal()) {
            (Some(delta), Some(level)) => match self.settings.display_units() {
                DisplayUnits::Pressure => write!(text, "{:.2}", delta),
                DisplayUnits::Gallons => write!(text, "{:.1}", level),
            },
            _ => text.push_str(UNCALIBRATED_TEXT).map_err(|_| core::fmt::Error),
        };
        if written.is_err() {
            text.clear();
            let _ = text.push_str(UNCALIBRATED_TEXT);
        }
        text
    }
}
