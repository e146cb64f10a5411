//! In-crate test doubles shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use crate::Millis;
use crate::app::ports::{PressureSample, PressureTransducer, TransitionLog};
use crate::sensors::{DisplayText, LiquidProbe};

/// A digital pin whose level is shared between clones, so a test can keep
/// one handle while the driver owns the other.
#[derive(Clone)]
pub struct MockPin {
    level: Rc<Cell<bool>>,
    failing: Rc<Cell<bool>>,
}

impl MockPin {
    pub fn new(high: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(high)),
            failing: Rc::new(Cell::new(false)),
        }
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }

    pub fn set_level(&self, high: bool) {
        self.level.set(high);
    }

    pub fn fail_io(&mut self, failing: bool) {
        self.failing.set(failing);
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.failing.get() {
            return Err(ErrorKind::Other);
        }
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.failing.get() {
            return Err(ErrorKind::Other);
        }
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.failing.get() {
            return Err(ErrorKind::Other);
        }
        self.level.set(true);
        Ok(())
    }
}

/// Captures transition records as formatted lines.
#[derive(Default)]
pub struct RecordingLog {
    lines: RefCell<Vec<String>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines.borrow().iter().filter(|l| l.contains(needle)).count()
    }
}

impl TransitionLog for RecordingLog {
    fn record(&self, now_ms: Millis, component: &str, message: fmt::Arguments<'_>) {
        self.lines
            .borrow_mut()
            .push(format!("{} - {}: {}", now_ms, component, message));
    }
}

/// Transducer that replays queued polls, then repeats a steady sample.
pub struct ScriptedTransducer {
    queue: VecDeque<Option<PressureSample>>,
    steady: Option<PressureSample>,
}

impl ScriptedTransducer {
    pub fn steady(sample: PressureSample) -> Self {
        Self {
            queue: VecDeque::new(),
            steady: Some(sample),
        }
    }

    pub fn push(&mut self, sample: Option<PressureSample>) {
        self.queue.push_back(sample);
    }

    pub fn set_steady(&mut self, sample: Option<PressureSample>) {
        self.steady = sample;
    }
}

impl PressureTransducer for ScriptedTransducer {
    fn poll(&mut self) -> Option<PressureSample> {
        self.queue.pop_front().unwrap_or(self.steady)
    }
}

/// Probe stand-in with a fixed contact state.
pub struct FixedProbe(pub bool);

impl LiquidProbe for FixedProbe {
    fn advance(&mut self, _now_ms: Millis) {}

    fn is_touching(&self) -> bool {
        self.0
    }

    fn display(&self) -> DisplayText {
        DisplayText::new()
    }
}
