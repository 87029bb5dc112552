//! Signal bar planning
//!
//! The bar is drawn on pages 5 and 6 of each controller half, as two
//! independent copies starting at logical columns 0 and 64. A bar of
//! height `h` (0-64) consists of:
//!
//! ```text
//!   page 5  ▔▔▔▔▔▔▔▔▔▔▔▔█            █   <- "on" pattern, h columns
//!   page 6              █▁▁▁▁▁▁▁▁▁▁▁█   <- "off" pattern after the level marker
//!           0          h            63
//! ```
//!
//! A full bar (h = 64) has no markers and no remainder; an empty bar has no
//! markers and fills the remainder from column 0.
//!
//! The reference firmware drew the right half slightly differently from the
//! left (no end marker, and a zero-height remainder two columns short).
//! [`BarMirror::Symmetric`] draws both halves identically;
//! [`BarMirror::Reference`] keeps the old right-half output.

use heapless::Vec;

use crate::geometry::{Chip, CHIP_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Filled part of the bar (top pixel of the upper page)
pub const BAR_ON: u8 = 0x01;

/// Empty part of the bar (bottom pixel of the lower page)
pub const BAR_OFF: u8 = 0x80;

/// Vertical marker spanning a whole page
pub const BAR_MARKER: u8 = 0xFF;

/// Upper bar page
pub const BAR_TOP_PAGE: u8 = 5;

/// Lower bar page
pub const BAR_BOTTOM_PAGE: u8 = 6;

/// Largest bar height (one half width)
pub const BAR_MAX: u8 = CHIP_WIDTH;

/// Upper bound on the operations for one half
const MAX_OPS: usize = 12;

/// How the right half relates to the left half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BarMirror {
    /// Both halves are drawn identically
    #[default]
    Symmetric,
    /// Right half reproduces the reference firmware output
    Reference,
}

/// One step of a bar redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BarOp {
    /// Position the cursor at a logical page and column
    GoTo { page: u8, column: u8 },
    /// Write `count` copies of `pattern` from the current cursor
    Fill { pattern: u8, count: u8 },
}

/// Ordered operations for one half of the bar
pub type BarPlan = Vec<BarOp, MAX_OPS>;

/// Clamp a requested height to the drawable range
///
/// Returns the height and whether it had to be clamped.
pub fn clamp_height(height: u8) -> (u8, bool) {
    if height > BAR_MAX {
        (BAR_MAX, true)
    } else {
        (height, false)
    }
}

/// Plan the redraw of one half
///
/// Heights above 64 draw a full bar; use [`clamp_height`] first to learn
/// whether that happened.
pub fn plan_half(height: u8, chip: Chip, mirror: BarMirror) -> BarPlan {
    let height = height.min(BAR_MAX);
    let base = chip.base_column();
    let legacy_right = mirror == BarMirror::Reference && chip == Chip::Right;
    let mut plan = BarPlan::new();

    push(&mut plan, BarOp::GoTo {
        page: BAR_TOP_PAGE,
        column: base,
    });
    if height > 0 {
        push(&mut plan, BarOp::Fill {
            pattern: BAR_ON,
            count: height,
        });
    }

    if height < BAR_MAX {
        if height != 0 {
            if !legacy_right {
                push_marker(&mut plan, base + BAR_MAX - 1);
            }
            push_marker(&mut plan, base + height);
            let remainder = BAR_MAX.saturating_sub(height + 2);
            if remainder > 0 {
                push(&mut plan, BarOp::Fill {
                    pattern: BAR_OFF,
                    count: remainder,
                });
            }
        } else {
            let remainder = if legacy_right { BAR_MAX - 2 } else { BAR_MAX };
            push(&mut plan, BarOp::Fill {
                pattern: BAR_OFF,
                count: remainder,
            });
        }
    }

    plan
}

/// Plan capacity covers the longest half, so a push cannot fail
fn push(plan: &mut BarPlan, op: BarOp) {
    let _ = plan.push(op);
}

/// Full-height marker at `column` on both bar pages
fn push_marker(plan: &mut BarPlan, column: u8) {
    for page in [BAR_TOP_PAGE, BAR_BOTTOM_PAGE] {
        push(plan, BarOp::GoTo { page, column });
        push(plan, BarOp::Fill {
            pattern: BAR_MARKER,
            count: 1,
        });
    }
}

/// Plan the erase that follows the hold time: both bar pages, both halves
pub fn plan_clear() -> BarPlan {
    let mut plan = BarPlan::new();
    for page in [BAR_TOP_PAGE, BAR_BOTTOM_PAGE] {
        for chip in Chip::ALL {
            push(&mut plan, BarOp::GoTo {
                page,
                column: chip.base_column(),
            });
            push(&mut plan, BarOp::Fill {
                pattern: 0x00,
                count: CHIP_WIDTH,
            });
        }
    }
    plan
}
