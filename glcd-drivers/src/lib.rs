//! Hardware driver implementations
//!
//! This crate provides the concrete panel driver on top of the traits in
//! glcd-hal and the layout logic in glcd-core:
//!
//! - KS0108 bus protocol (busy-flag handshake, strobes, chip select)
//! - Drawing primitives over the two controller halves
//! - Duty meter glue (sample, PWM, label, bar)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod ks0108;
pub mod meter;

#[cfg(test)]
mod sim;

pub use ks0108::{CharOutcome, Glcd, Ks0108Bus};
pub use meter::DutyMeter;
