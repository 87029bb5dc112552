//! Board-agnostic core logic for dual-controller graphic LCDs
//!
//! The panel is 128x64 pixels split into two independently addressed
//! 64-column controllers. This crate contains everything that does not
//! touch the bus:
//!
//! - Controller command encoding
//! - Logical column to (chip, local column) translation
//! - The 5x7 glyph table
//! - String layout across the controller seam
//! - Bar-graph planning
//! - Decimal text helpers and meter scaling math
//! - Configuration type definitions
//! - The display trait the meter renders through

#![no_std]
#![deny(unsafe_code)]

pub mod bar;
pub mod command;
pub mod config;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod meter;
pub mod text;
pub mod traits;

pub use command::Command;
pub use geometry::{Chip, GoTo, Location, CHIP_WIDTH, HEIGHT, PAGES, WIDTH};
