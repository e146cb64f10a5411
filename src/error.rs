//! Unified error types for the sparge controller firmware.
//!
//! The per-tick control path never returns errors: sensors and pins degrade
//! to their safe reading instead.  These types cover the places where a
//! failure *can* be surfaced: configuration validation, peripheral setup, and
//! the transducer adapter's bus traffic.  All variants are `Copy` so they can
//! be logged and passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(&'static str),
    /// A digital pin could not be read or driven.
    Pin(PinError),
    /// The pressure transducer did not respond as expected.
    Transducer(TransducerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Pin(e) => write!(f, "pin: {e}"),
            Self::Transducer(e) => write!(f, "transducer: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Pin errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    /// Input level could not be sampled.
    ReadFailed,
    /// Output level could not be set.
    WriteFailed,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "GPIO read failed"),
            Self::WriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<PinError> for Error {
    fn from(e: PinError) -> Self {
        Self::Pin(e)
    }
}

// ---------------------------------------------------------------------------
// Transducer errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransducerError {
    /// The conversion command was not acknowledged.
    CommandFailed,
    /// The status/data frame could not be read back.
    ReadFailed,
}

impl fmt::Display for TransducerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandFailed => write!(f, "conversion command failed"),
            Self::ReadFailed => write!(f, "data read failed"),
        }
    }
}

impl From<TransducerError> for Error {
    fn from(e: TransducerError) -> Self {
        Self::Transducer(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
