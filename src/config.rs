//! Controller configuration parameters.
//!
//! [`ControllerConfig`] holds the fixed tunables handed to components at
//! construction.  [`BoilSettings`] is the small runtime context that the
//! front-panel menu edits while the boil-kettle level sensor reads it.
//! Nothing here is persisted; every value resets to its default on power-up.

use core::cell::Cell;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::error::{Error, Result};

/// One full pulsed-pump duty period: on-duration + off-duration.
pub const DUTY_PERIOD_MS: Millis = 60_000;

/// Core controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Water (sparge) pump ---
    /// Minimum time the mash probe must stay clear before the water pump
    /// is allowed back on (milliseconds)
    pub water_pump_delay_ms: Millis,

    // --- Wort (boil) pump ---
    /// Wort pump on-time within each one-minute duty period (milliseconds)
    pub wort_pump_on_ms: Millis,
    /// Half-period of the pulsing boil-probe alarm (milliseconds)
    pub boil_alarm_pulse_ms: Millis,

    // --- Buttons ---
    /// Length of the click sound on a registered press (milliseconds)
    pub button_beep_ms: Millis,
    /// Minimum time between registered presses (milliseconds)
    pub button_cooldown_ms: Millis,

    // --- Boil kettle level ---
    /// Pressure units per gallon of kettle volume
    pub level_scale: f32,
    /// Initial first boil stop (gallons)
    pub boil_stop_one_gal: f32,
    /// Initial second boil stop (gallons)
    pub boil_stop_two_gal: f32,
    /// Menu adjustment step for the boil stops (gallons)
    pub boil_stop_step_gal: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Water pump
            water_pump_delay_ms: 5_000,

            // Wort pump
            wort_pump_on_ms: 15_000, // 15 s on / 45 s off
            boil_alarm_pulse_ms: 500,

            // Buttons
            button_beep_ms: 10,
            button_cooldown_ms: 500,

            // Boil kettle
            level_scale: 2.0,
            boil_stop_one_gal: 6.0,
            boil_stop_two_gal: 7.5,
            boil_stop_step_gal: 0.5,
        }
    }
}

impl ControllerConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<()> {
        if self.wort_pump_on_ms == 0 || self.wort_pump_on_ms > DUTY_PERIOD_MS {
            return Err(Error::Config("wort_pump_on_ms must be within 1..=60000"));
        }
        if self.boil_alarm_pulse_ms == 0 {
            return Err(Error::Config("boil_alarm_pulse_ms must be non-zero"));
        }
        if self.button_beep_ms > self.button_cooldown_ms {
            return Err(Error::Config("button_beep_ms must not exceed button_cooldown_ms"));
        }
        if !(self.level_scale.is_finite() && self.level_scale > 0.0) {
            return Err(Error::Config("level_scale must be a positive number"));
        }
        if !(self.boil_stop_step_gal.is_finite() && self.boil_stop_step_gal > 0.0) {
            return Err(Error::Config("boil_stop_step_gal must be a positive number"));
        }
        for stop in [self.boil_stop_one_gal, self.boil_stop_two_gal] {
            if !(stop.is_finite() && stop >= 0.0) {
                return Err(Error::Config("boil stops must be non-negative"));
            }
        }
        Ok(())
    }

    /// Off-time of the wort pump within each duty period.
    pub fn wort_pump_off_ms(&self) -> Millis {
        DUTY_PERIOD_MS.saturating_sub(self.wort_pump_on_ms)
    }
}

// ---------------------------------------------------------------------------
// Boil kettle runtime settings
// ---------------------------------------------------------------------------

/// Which of the two boil stops the level sensor compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoilStop {
    One,
    Two,
}

impl fmt::Display for BoilStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "Boil Stop 1"),
            Self::Two => write!(f, "Boil Stop 2"),
        }
    }
}

/// What the level sensor shows on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayUnits {
    /// Raw pressure delta above the calibrated zero.
    Pressure,
    /// Estimated kettle volume.
    Gallons,
}

impl fmt::Display for DisplayUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure => write!(f, "Pressure"),
            Self::Gallons => write!(f, "Gallons"),
        }
    }
}

/// Boil-kettle settings shared between the menu (writer) and the level
/// sensor (reader).
///
/// Single-threaded: the menu and the sensor both hold `&BoilSettings`
/// and the `Cell` fields let the menu edit values in between ticks.
#[derive(Debug, Serialize, Deserialize)]
pub struct BoilSettings {
    stop_one_gal: Cell<f32>,
    stop_two_gal: Cell<f32>,
    active_stop: Cell<BoilStop>,
    units: Cell<DisplayUnits>,
    step_gal: f32,
}

impl BoilSettings {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            stop_one_gal: Cell::new(config.boil_stop_one_gal),
            stop_two_gal: Cell::new(config.boil_stop_two_gal),
            active_stop: Cell::new(BoilStop::One),
            units: Cell::new(DisplayUnits::Gallons),
            step_gal: config.boil_stop_step_gal,
        }
    }

    /// Volume (gallons) at which the given stop trips.
    pub fn stop_gal(&self, stop: BoilStop) -> f32 {
        match stop {
            BoilStop::One => self.stop_one_gal.get(),
            BoilStop::Two => self.stop_two_gal.get(),
        }
    }

    pub fn set_stop_gal(&self, stop: BoilStop, gallons: f32) {
        let gallons = gallons.max(0.0);
        match stop {
            BoilStop::One => self.stop_one_gal.set(gallons),
            BoilStop::Two => self.stop_two_gal.set(gallons),
        }
    }

    /// Move a stop up (positive) or down (negative) by whole menu steps.
    /// Never goes below zero.
    pub fn adjust_stop(&self, stop: BoilStop, steps: i8) {
        let next = self.stop_gal(stop) + f32::from(steps) * self.step_gal;
        self.set_stop_gal(stop, next);
    }

    pub fn active_stop(&self) -> BoilStop {
        self.active_stop.get()
    }

    pub fn select_stop(&self, stop: BoilStop) {
        self.active_stop.set(stop);
    }

    /// Threshold the level sensor currently trips at.
    pub fn active_threshold_gal(&self) -> f32 {
        self.stop_gal(self.active_stop())
    }

    pub fn display_units(&self) -> DisplayUnits {
        self.units.get()
    }

    pub fn set_display_units(&self, units: DisplayUnits) {
        self.units.set(units);
    }
}

impl Default for BoilSettings {
    fn default() -> Self {
        Self::new(&ControllerConfig::default())
    }
}
