//! Auto-sparge controller interlock library.
//!
//! Exposes the probe, pump, button and alarm logic for integration testing
//! on the host.  ESP-IDF specifics live in the `adapters` (behind
//! `#[cfg(target_os = "espidf")]`) and in the firmware binary.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarm;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod sensors;

#[cfg(test)]
mod testing;

/// Milliseconds since boot, as read once per tick from the monotonic clock.
pub type Millis = u64;
