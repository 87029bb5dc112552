//! KS0108 panel driver
//!
//! Two KS0108 controllers share the control and data lines; the chip-select
//! lines decide which one a transfer reaches. [`Ks0108Bus`] owns the pins
//! and performs single transfers; [`Glcd`] builds the drawing primitives on
//! top of it.

pub mod bus;
pub mod display;

pub use bus::{BusPhase, Ks0108Bus};
pub use display::{CharOutcome, Glcd};
