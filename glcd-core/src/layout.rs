//! String layout across the controller seam
//!
//! Text is laid out left to right in fixed six-pixel cells. A glyph never
//! straddles the seam between the two controllers: when the next cell would
//! cross logical column 64 it moves to column 64 instead. Once the cursor
//! reaches the right edge the remaining characters are dropped.

use core::str::Chars;

use crate::font::GLYPH_ADVANCE;
use crate::geometry::{CHIP_WIDTH, WIDTH};

/// Last start column whose cell still fits on the left controller
pub const SEAM_LIMIT: u8 = CHIP_WIDTH - GLYPH_ADVANCE;

/// Where one character is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Placement {
    /// Logical start column of the glyph
    pub column: u8,
    /// Character to draw
    pub ch: char,
}

/// What happened while laying out a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayoutSummary {
    /// Characters placed
    pub placed: usize,
    /// The cursor jumped over the seam
    pub wrapped: bool,
    /// Characters were dropped at the right edge
    pub truncated: bool,
}

/// Iterator over the placements of a string
///
/// ```
/// use glcd_core::layout::StringLayout;
///
/// let columns: Vec<u8> = StringLayout::new(2, "OK").map(|p| p.column).collect();
/// assert_eq!(columns, [2, 8]);
/// ```
#[derive(Debug, Clone)]
pub struct StringLayout<'a> {
    chars: Chars<'a>,
    /// Running column; wider than `u8` so the advance past 127 cannot wrap
    cursor: u16,
    summary: LayoutSummary,
    finished: bool,
}

impl<'a> StringLayout<'a> {
    /// Lay out `text` starting at logical `column`
    pub fn new(column: u8, text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            cursor: column as u16,
            summary: LayoutSummary::default(),
            finished: false,
        }
    }

    /// Summary of the placements produced so far
    ///
    /// `truncated` is only known once the iterator has returned `None`.
    pub fn summary(&self) -> LayoutSummary {
        self.summary
    }
}

impl Iterator for StringLayout<'_> {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        if self.finished {
            return None;
        }

        if self.cursor >= WIDTH as u16 {
            self.finished = true;
            self.summary.truncated = self.chars.clone().next().is_some();
            return None;
        }

        let Some(ch) = self.chars.next() else {
            self.finished = true;
            return None;
        };

        // Snap to the right controller rather than straddle the seam
        if self.cursor > SEAM_LIMIT as u16 && self.cursor < CHIP_WIDTH as u16 {
            self.cursor = CHIP_WIDTH as u16;
            self.summary.wrapped = true;
        }

        let placement = Placement {
            column: self.cursor as u8,
            ch,
        };
        self.cursor += GLYPH_ADVANCE as u16;
        self.summary.placed += 1;
        Some(placement)
    }
}
