//! Application boundary: port traits the interlock core depends on.
//!
//! Everything behind these traits (serial console, transducer bus) is an
//! adapter; everything in front of them is pure decision logic that can be
//! driven tick-by-tick from tests.

pub mod ports;
