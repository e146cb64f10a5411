//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements           | Connects to                 |
//! |------------|----------------------|-----------------------------|
//! | `log_sink` | TransitionLog        | `log` facade / serial       |
//! | `mprls`    | PressureTransducer   | Honeywell MPRLS over I2C    |
//! | `time`     | (clock for the loop) | ESP32 system timer          |

pub mod log_sink;
pub mod mprls;
pub mod time;
