//! Drawing layout settings

use crate::bar::BarMirror;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Percentage label placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelConfig {
    /// Page the label is drawn on
    pub page: u8,
    /// Logical start column
    pub column: u8,
    /// Zero bytes written from the start column before redrawing
    ///
    /// The controller's column counter wraps within its own half, so a run
    /// longer than the distance to the panel edge continues from the start
    /// of the right half.
    pub clear_width: u8,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            page: 0,
            column: 100,
            clear_width: 100,
        }
    }
}

/// Signal bar behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BarConfig {
    /// Time the bar stays visible before it is erased, in milliseconds
    pub hold_ms: u32,
    /// Right-half drawing mode
    pub mirror: BarMirror,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            hold_ms: 100,
            mirror: BarMirror::Symmetric,
        }
    }
}
