//! Honeywell MPRLS pressure transducer adapter (I2C).
//!
//! Implements [`PressureTransducer`] on top of any `embedded-hal` 1.0
//! [`I2c`] bus.  The sensor needs ~5 ms per conversion, so the adapter
//! never waits for it: one poll issues the measure command, a later poll
//! collects the frame.  A NACK or bus error reads as "disconnected".
//!
//! ## Frame layout
//!
//! | Byte | Content                               |
//! |------|---------------------------------------|
//! | 0    | status (0x40 powered, 0x20 busy, ...) |
//! | 1..4 | 24-bit pressure counts, MSB first     |

use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::{PressureSample, PressureTransducer};
use crate::error::TransducerError;

/// Default 7-bit bus address.
pub const DEFAULT_ADDRESS: u8 = 0x18;

const CMD_MEASURE: [u8; 3] = [0xAA, 0x00, 0x00];
const STATUS_BUSY: u8 = 0x20;

/// Transfer function: 10% .. 90% of 2^24 counts spans the pressure range.
const COUNTS_MIN: u32 = 0x19_999A;
const COUNTS_MAX: u32 = 0xE6_6666;

const HPA_PER_PSI: f32 = 68.947_57;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Converting,
}

pub struct Mprls<I2C> {
    bus: I2C,
    address: u8,
    psi_min: f32,
    psi_max: f32,
    phase: Phase,
}

impl<I2C: I2c> Mprls<I2C> {
    /// 0–25 PSI part at the default address.
    pub fn new(bus: I2C) -> Self {
        Self::with_range(bus, DEFAULT_ADDRESS, 0.0, 25.0)
    }

    pub fn with_range(bus: I2C, address: u8, psi_min: f32, psi_max: f32) -> Self {
        Self {
            bus,
            address,
            psi_min,
            psi_max,
            phase: Phase::Idle,
        }
    }

    /// Give the bus back (e.g. to share it with another driver).
    pub fn release(self) -> I2C {
        self.bus
    }

    fn start_conversion(&mut self) -> Result<(), TransducerError> {
        self.bus
            .write(self.address, &CMD_MEASURE)
            .map_err(|_| TransducerError::CommandFailed)
    }

    fn read_frame(&mut self) -> Result<[u8; 4], TransducerError> {
        let mut frame = [0u8; 4];
        self.bus
            .read(self.address, &mut frame)
            .map_err(|_| TransducerError::ReadFailed)?;
        Ok(frame)
    }

    fn counts_to_hpa(&self, counts: u32) -> f32 {
        let span = (COUNTS_MAX - COUNTS_MIN) as f32;
        let psi = (counts as f32 - COUNTS_MIN as f32) * (self.psi_max - self.psi_min) / span
            + self.psi_min;
        psi * HPA_PER_PSI
    }
}

impl<I2C: I2c> PressureTransducer for Mprls<I2C> {
    fn poll(&mut self) -> Option<PressureSample> {
        match self.phase {
            Phase::Idle => match self.start_conversion() {
                Ok(()) => {
                    self.phase = Phase::Converting;
                    None
                }
                Err(e) => {
                    warn!("MPRLS: {e}");
                    Some(PressureSample::disconnected())
                }
            },
            Phase::Converting => {
                let frame = match self.read_frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!("MPRLS: {e}");
                        self.phase = Phase::Idle;
                        return Some(PressureSample::disconnected());
                    }
                };

                let status = frame[0];
                if status & STATUS_BUSY != 0 {
                    return None;
                }

                let counts = u32::from_be_bytes([0, frame[1], frame[2], frame[3]]);
                let sample = PressureSample {
                    status,
                    pressure: self.counts_to_hpa(counts),
                };

                // Kick off the next conversion straight away; a failure
                // here is retried from Idle on the next poll.
                self.phase = match self.start_conversion() {
                    Ok(()) => Phase::Converting,
                    Err(_) => Phase::Idle,
                };
                Some(sample)
            }
        }
    }
}
