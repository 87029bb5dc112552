//! Configuration types
//!
//! Board-agnostic configuration for the panel driver. Every `Default` matches
//! the wiring and timing of the reference board.

pub mod bus;
pub mod panel;

pub use bus::*;
pub use panel::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlcdConfig {
    /// Control line assignment on the control bank
    pub pins: ControlPins,
    /// Chip-select polarity
    pub chip_select: ChipSelectPolarity,
    /// Bus timing
    pub timing: BusTiming,
    /// Busy-flag polling policy
    pub busy: BusyPolicy,
    /// Percentage label placement
    pub label: LabelConfig,
    /// Signal bar behaviour
    pub bar: BarConfig,
}
