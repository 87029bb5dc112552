//! Hardware abstraction traits
//!
//! These traits define the interface between the meter logic and the
//! panel driver.

pub mod display;

pub use display::{DisplayError, MeterDisplay, MeterDisplayExt};
