//! Non-duplicating alarm aggregator.
//!
//! Several independent producers share one audible output:
//!
//! ```text
//! ┌──────────────┐
//! │ Water pump   │──"MashProbeHigh"──▶┌──────────────────┐
//! │ Wort pump    │──"BoilProbe"──────▶│ AlarmAggregator  │──▶ Buzzer
//! │ Buttons      │──"<button name>"──▶│ (set of sources) │
//! └──────────────┘                    └──────────────────┘
//! ```
//!
//! Each producer raises and clears only its own source id, so one source
//! clearing never silences another.  The buzzer sounds while the set is
//! non-empty.

use heapless::FnvIndexSet;
use log::{debug, error};

/// Maximum number of simultaneously raised sources.
/// Power of 2 (required by the index set).
pub const MAX_SOURCES: usize = 16;

/// Identifier of an alarm producer (e.g. `"MashProbeHigh"`).
pub type AlarmSource = &'static str;

pub struct AlarmAggregator {
    name: &'static str,
    sources: FnvIndexSet<AlarmSource, MAX_SOURCES>,
    /// Set when a raise could not be recorded for lack of room.
    /// Keeps the output sounding until the set drains completely.
    overflowed: bool,
}

impl AlarmAggregator {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sources: FnvIndexSet::new(),
            overflowed: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Mark `source` as active.  Raising an already-active source is a no-op.
    pub fn raise(&mut self, source: AlarmSource) {
        match self.sources.insert(source) {
            Ok(true) => debug!("{}: raised {}", self.name, source),
            Ok(false) => {}
            Err(_) => {
                if !self.overflowed {
                    error!("{}: source table full, dropping {}", self.name, source);
                }
                self.overflowed = true;
            }
        }
    }

    /// Mark `source` as inactive.  Clearing an absent source is a no-op.
    pub fn clear(&mut self, source: AlarmSource) {
        if self.sources.remove(&source) {
            debug!("{}: cleared {}", self.name, source);
        }
        if self.sources.is_empty() {
            self.overflowed = false;
        }
    }

    /// Raise or clear `source` depending on `active`.
    pub fn set(&mut self, source: AlarmSource, active: bool) {
        if active {
            self.raise(source);
        } else {
            self.clear(source);
        }
    }

    /// True while at least one source is raised.
    pub fn is_active(&self) -> bool {
        !self.sources.is_empty() || self.overflowed
    }

    /// Check whether a specific source is raised.
    pub fn is_raised(&self, source: AlarmSource) -> bool {
        self.sources.contains(&source)
    }

    /// Currently raised sources, in no particular order.
    pub fn sources(&self) -> impl Iterator<Item = AlarmSource> + '_ {
        self.sources.iter().copied()
    }

    /// Number of recorded sources.  A source dropped on overflow is not
    /// counted, though it still keeps [`is_active`](Self::is_active) true.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
