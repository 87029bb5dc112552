//! Panel geometry and address translation
//!
//! The panel exposes one logical 128-column address space, but the pixels
//! live in two controllers of 64 columns each. Every logical column maps to
//! exactly one (chip, local column) pair:
//!
//! ```text
//!   logical column   0 ............ 63 | 64 ........... 127
//!   chip                  Left (1)     |      Right (2)
//!   local column     0 ............ 63 | 0 ............  63
//! ```
//!
//! Vertically the panel is 8 pages of 8 pixels; a data byte fills one
//! column of one page, bit 0 at the top.

use crate::command::Command;

/// Panel width in pixels (logical columns)
pub const WIDTH: u8 = 128;

/// Panel height in pixels
pub const HEIGHT: u8 = 64;

/// Number of 8-pixel pages
pub const PAGES: u8 = HEIGHT / 8;

/// Columns owned by one controller
pub const CHIP_WIDTH: u8 = WIDTH / 2;

/// One of the two controller halves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Chip {
    /// Chip 1, logical columns 0-63
    Left = 1,
    /// Chip 2, logical columns 64-127
    Right = 2,
}

impl Chip {
    /// Both chips, in select order
    pub const ALL: [Chip; 2] = [Chip::Left, Chip::Right];

    /// Chip id as wired to the select lines (1 or 2)
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Chip for a select id
    ///
    /// Any id other than 1 or 2 selects no chip.
    pub const fn from_id(id: u8) -> Option<Chip> {
        match id {
            1 => Some(Chip::Left),
            2 => Some(Chip::Right),
            _ => None,
        }
    }

    /// Chip that owns a logical column
    ///
    /// Returns `None` past the right edge.
    pub const fn for_column(column: u8) -> Option<Chip> {
        if column < CHIP_WIDTH {
            Some(Chip::Left)
        } else if column < WIDTH {
            Some(Chip::Right)
        } else {
            None
        }
    }

    /// First logical column owned by this chip
    pub const fn base_column(self) -> u8 {
        match self {
            Chip::Left => 0,
            Chip::Right => CHIP_WIDTH,
        }
    }

    /// Array index for per-chip tables (0 or 1)
    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

/// Physical address of a logical (page, column) position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Location {
    /// Page (0-7)
    pub page: u8,
    /// Controller owning the column
    pub chip: Chip,
    /// Column within the controller (0-63)
    pub local_column: u8,
}

impl Location {
    /// Translate a logical position
    ///
    /// Returns `None` when `page >= 8` or `column >= 128`; callers treat that
    /// as a request to ignore, not as a fault.
    pub const fn locate(page: u8, column: u8) -> Option<Location> {
        if page >= PAGES {
            return None;
        }
        let chip = match Chip::for_column(column) {
            Some(chip) => chip,
            None => return None,
        };
        Some(Location {
            page,
            chip,
            local_column: column - chip.base_column(),
        })
    }

    /// Logical column this location corresponds to
    pub const fn column(&self) -> u8 {
        self.chip.base_column() + self.local_column
    }

    /// Command latching the page register
    pub const fn set_page(&self) -> Command {
        Command::SetPage(self.page)
    }

    /// Command latching the column register
    pub const fn set_column(&self) -> Command {
        Command::SetColumn(self.local_column)
    }
}

/// Result of a cursor positioning request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GoTo {
    /// The chip was selected and both address commands were sent
    Moved(Location),
    /// The coordinates were out of range; nothing was sent
    Ignored,
}

impl GoTo {
    /// Check if the request was ignored
    pub const fn is_ignored(&self) -> bool {
        matches!(self, GoTo::Ignored)
    }

    /// Location the cursor was moved to, if any
    pub const fn location(&self) -> Option<Location> {
        match self {
            GoTo::Moved(location) => Some(*location),
            GoTo::Ignored => None,
        }
    }
}
