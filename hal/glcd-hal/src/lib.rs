//! glcd Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the panel driver and
//! the meter glue are written against. Chip-specific crates (or the
//! firmware binary) implement them on top of real registers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (glcd-firmware, etc.)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  glcd-drivers (KS0108 bus + drawing)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  glcd-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ RP2040 banks  │       │ test doubles  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::PinBank`] - An 8-bit I/O bank with per-pin direction control
//! - [`analog::AnalogSampler`] - 10-bit analog sample source
//! - [`analog::PwmOutput`] - 8-bit PWM duty output

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use analog::{AnalogSampler, PwmOutput};
pub use gpio::{Direction, Level, PinBank};
