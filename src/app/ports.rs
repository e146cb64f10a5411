//! Port traits: the boundary between the interlock logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ probes / pumps / buttons / buzzer
//! ```
//!
//! Driven adapters (serial log, pressure transducer) implement these traits.
//! Components receive them at construction, so the control logic never
//! touches a serial port or an I2C bus directly.

use core::fmt;

use crate::Millis;

// ───────────────────────────────────────────────────────────────
// Transition log (driven adapter: domain → serial console)
// ───────────────────────────────────────────────────────────────

/// Sink for state-transition records.
///
/// Components call this only when their observable state changes.  The
/// production adapter renders `<timestamp> - <component-name>: <message>`.
pub trait TransitionLog {
    fn record(&self, now_ms: Millis, component: &str, message: fmt::Arguments<'_>);
}

impl<T: TransitionLog + ?Sized> TransitionLog for &T {
    fn record(&self, now_ms: Millis, component: &str, message: fmt::Arguments<'_>) {
        (**self).record(now_ms, component, message);
    }
}

// ───────────────────────────────────────────────────────────────
// Pressure transducer (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Status byte reported by a powered, idle transducer with a valid sample.
pub const STATUS_CONNECTED: u8 = 0x40;

/// One conversion result from the boil-kettle pressure transducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureSample {
    /// Raw status byte.  Only [`STATUS_CONNECTED`] means "sensor healthy".
    pub status: u8,
    /// Pressure reading (hPa).  Meaningless unless the status is connected.
    pub pressure: f32,
}

impl PressureSample {
    pub const fn connected(pressure: f32) -> Self {
        Self {
            status: STATUS_CONNECTED,
            pressure,
        }
    }

    /// Sample reported when the sensor is unplugged or the bus fails.
    pub const fn disconnected() -> Self {
        Self {
            status: 0,
            pressure: 0.0,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == STATUS_CONNECTED
    }
}

/// Read-side port for the pressure transducer.
pub trait PressureTransducer {
    /// Non-blocking poll.  Returns `None` when no new conversion is ready
    /// this tick; a missing sample never counts as a disconnect.
    fn poll(&mut self) -> Option<PressureSample>;
}

impl<T: PressureTransducer + ?Sized> PressureTransducer for &mut T {
    fn poll(&mut self) -> Option<PressureSample> {
        (**self).poll()
    }
}
