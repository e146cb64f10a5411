//! Log-based transition sink adapter.
//!
//! Implements [`TransitionLog`] by writing one line per state change to the
//! `log` facade (which goes to UART / USB-CDC in production).

use core::fmt;

use log::info;

use crate::Millis;
use crate::app::ports::TransitionLog;

/// Adapter that logs every transition to the serial console as
/// `<timestamp> - <component>: <message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialLog;

impl SerialLog {
    pub fn new() -> Self {
        Self
    }
}

impl TransitionLog for SerialLog {
    fn record(&self, now_ms: Millis, component: &str, message: fmt::Arguments<'_>) {
        info!("{} - {}: {}", now_ms, component, message);
    }
}
