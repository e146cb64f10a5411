//! Debounced toggle button with an indicator light.
//!
//! ## Hardware
//!
//! Momentary switch (active-low with pull-up by default) plus an indicator
//! LED that is lit while the button's matching function is on.
//!
//! ## Behaviour
//!
//! | State    | Condition                               | Next      |
//! |----------|-----------------------------------------|-----------|
//! | Eligible | pressed                                 | Cooldown  |
//! | Cooldown | released and cooldown elapsed           | Eligible  |
//!
//! Entering `Cooldown` flips the matching function and raises a short
//! click on the alarm aggregator, keyed by the button's name.  Holding the
//! button never re-triggers: it must be released after the cooldown first.

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::Millis;
use crate::adapters::log_sink::SerialLog;
use crate::alarm::AlarmAggregator;
use crate::app::ports::TransitionLog;
use crate::config::ControllerConfig;
use crate::drivers::{Polarity, drive, read_asserted};
use crate::error::{Error, PinError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Eligibility {
    Eligible,
    Cooldown { until_ms: Millis },
}

pub struct DebouncedButton<I, O, L = SerialLog> {
    name: &'static str,
    input: I,
    light: O,
    input_polarity: Polarity,
    light_polarity: Polarity,
    eligibility: Eligibility,
    matching_function: bool,
    /// Click source is cleared once `now >= click_until_ms`.
    click_until_ms: Millis,
    beep_ms: Millis,
    cooldown_ms: Millis,
    read_fault: bool,
    log: L,
}

impl<I: InputPin, O: OutputPin, L: TransitionLog> DebouncedButton<I, O, L> {
    pub fn new(name: &'static str, input: I, light: O, config: &ControllerConfig, log: L) -> Self {
        let mut button = Self {
            name,
            input,
            light,
            input_polarity: Polarity::ActiveLow,
            light_polarity: Polarity::ActiveHigh,
            eligibility: Eligibility::Eligible,
            matching_function: false,
            click_until_ms: 0,
            beep_ms: config.button_beep_ms,
            cooldown_ms: config.button_cooldown_ms,
            read_fault: false,
            log,
        };
        button.drive_light();
        button
    }

    pub fn with_polarity(mut self, input: Polarity, light: Polarity) -> Self {
        self.input_polarity = input;
        self.light_polarity = light;
        self.drive_light();
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the function this button controls is switched on.
    pub fn matching_function(&self) -> bool {
        self.matching_function
    }

    pub fn is_eligible(&self) -> bool {
        self.eligibility == Eligibility::Eligible
    }

    /// Sample the input pin and run one cycle.  An unreadable input counts
    /// as released.
    pub fn advance(&mut self, now_ms: Millis, alarms: &mut AlarmAggregator) {
        let pressed = match read_asserted(&mut self.input, self.input_polarity) {
            Some(pressed) => {
                self.read_fault = false;
                pressed
            }
            None => {
                if !self.read_fault {
                    warn!("{}: {}, treating as released", self.name, Error::from(PinError::ReadFailed));
                }
                self.read_fault = true;
                false
            }
        };
        self.update(now_ms, pressed, alarms);
    }

    /// Run one cycle from an already-sampled input.
    pub fn update(&mut self, now_ms: Millis, pressed: bool, alarms: &mut AlarmAggregator) {
        match self.eligibility {
            Eligibility::Eligible if pressed => {
                self.log
                    .record(now_ms, self.name, format_args!("currently pushed."));
                self.eligibility = Eligibility::Cooldown {
                    until_ms: now_ms.saturating_add(self.cooldown_ms),
                };
                alarms.raise(self.name);
                self.click_until_ms = now_ms.saturating_add(self.beep_ms);
                self.matching_function = !self.matching_function;
            }
            Eligibility::Cooldown { until_ms } if !pressed && now_ms >= until_ms => {
                self.eligibility = Eligibility::Eligible;
            }
            _ => {}
        }

        if now_ms >= self.click_until_ms {
            alarms.clear(self.name);
        }

        self.drive_light();
    }

    fn drive_light(&mut self) {
        drive(
            &mut self.light,
            self.light_polarity,
            self.matching_function,
            self.name,
        );
    }
}
