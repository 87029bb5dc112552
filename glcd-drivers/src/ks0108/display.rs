//! Drawing primitives for a dual-KS0108 panel
//!
//! Driver for 128x64 panels built from two 64x64 KS0108 controllers.
//! Drawing is direct: there is no frame buffer, every primitive positions
//! the controller cursor and streams bytes straight into display RAM.

use embedded_hal::delay::DelayNs;
use glcd_core::bar::{self, BarOp, BarPlan};
use glcd_core::command::Command;
use glcd_core::config::{BarConfig, GlcdConfig, LabelConfig};
use glcd_core::font;
use glcd_core::geometry::{Chip, GoTo, Location, CHIP_WIDTH, PAGES};
use glcd_core::layout::{LayoutSummary, StringLayout};
use glcd_core::traits::{DisplayError, MeterDisplay};
use glcd_hal::gpio::PinBank;

use super::bus::Ks0108Bus;

/// What `write_char` drew
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CharOutcome {
    /// The character's own glyph was drawn
    Rendered,
    /// The character is outside the font; the blank glyph was drawn
    Substituted,
    /// The position was out of range; nothing was drawn
    Ignored,
}

/// KS0108 panel driver
pub struct Glcd<C, D, DL> {
    bus: Ks0108Bus<C, D, DL>,
    label: LabelConfig,
    bar: BarConfig,
}

impl<C, D, DL> Glcd<C, D, DL>
where
    C: PinBank,
    D: PinBank,
    DL: DelayNs,
{
    /// Create a new driver over the control bank, data bank and delay
    pub fn new(control: C, data: D, delay: DL, config: GlcdConfig) -> Self {
        Self {
            bus: Ks0108Bus::new(control, data, delay, &config),
            label: config.label,
            bar: config.bar,
        }
    }

    /// Initialize the panel
    ///
    /// Configures the lines, pulses reset, turns both controllers on with
    /// start line 0 and clears the screen.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.bus.configure_pins();
        self.bus.reset();

        for chip in Chip::ALL {
            self.bus.select_chip(Some(chip))?;
            self.bus.write_command(Command::DisplayOn)?;
            self.bus.write_command(Command::StartLine(0))?;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("glcd: panel initialized");

        self.clear_screen()
    }

    /// Zero both halves, page by page
    ///
    /// The cursor position afterwards is unspecified.
    pub fn clear_screen(&mut self) -> Result<(), DisplayError> {
        for page in 0..PAGES {
            for chip in Chip::ALL {
                self.go_to(page, chip.base_column())?;
                self.fill(0x00, CHIP_WIDTH)?;
            }
        }
        Ok(())
    }

    /// Move the cursor to a logical page and column
    ///
    /// Out-of-range coordinates are ignored: no chip is selected and no
    /// command is sent.
    pub fn go_to(&mut self, page: u8, column: u8) -> Result<GoTo, DisplayError> {
        let Some(location) = Location::locate(page, column) else {
            #[cfg(feature = "defmt")]
            defmt::trace!("glcd: ignoring go_to({}, {})", page, column);
            return Ok(GoTo::Ignored);
        };

        self.bus.select_chip(Some(location.chip))?;
        self.bus.write_command(location.set_page())?;
        self.bus.write_command(location.set_column())?;
        Ok(GoTo::Moved(location))
    }

    /// Draw one character with its trailing spacing column
    pub fn write_char(
        &mut self,
        page: u8,
        column: u8,
        ch: char,
    ) -> Result<CharOutcome, DisplayError> {
        if self.go_to(page, column)?.is_ignored() {
            return Ok(CharOutcome::Ignored);
        }

        for &bits in font::glyph(ch) {
            self.bus.write_data(bits)?;
        }
        self.bus.write_data(0x00)?;

        if font::is_supported(ch) {
            Ok(CharOutcome::Rendered)
        } else {
            Ok(CharOutcome::Substituted)
        }
    }

    /// Draw a string, wrapping over the seam and stopping at the right edge
    pub fn write_string(
        &mut self,
        page: u8,
        column: u8,
        text: &str,
    ) -> Result<LayoutSummary, DisplayError> {
        let mut layout = StringLayout::new(column, text);
        for placement in layout.by_ref() {
            self.write_char(page, placement.column, placement.ch)?;
        }

        let summary = layout.summary();
        #[cfg(feature = "defmt")]
        if summary.truncated {
            defmt::trace!("glcd: text truncated after {} chars", summary.placed);
        }
        Ok(summary)
    }

    /// Erase the label area and draw `text` in it
    pub fn write_percentage_label(&mut self, text: &str) -> Result<LayoutSummary, DisplayError> {
        let LabelConfig {
            page,
            column,
            clear_width,
        } = self.label;

        if let GoTo::Moved(_) = self.go_to(page, column)? {
            self.fill(0x00, clear_width)?;
        }
        self.write_string(page, column, text)
    }

    /// Draw the bar on both halves, hold it, then erase it
    pub fn draw_signal_bar(&mut self, height: u8) -> Result<(), DisplayError> {
        self.render_signal_bar(height)?;
        self.bus.delay_ms(self.bar.hold_ms);
        self.clear_signal_bar()
    }

    /// Draw the bar on both halves and leave it on screen
    ///
    /// Heights above 64 draw a full bar.
    pub fn render_signal_bar(&mut self, height: u8) -> Result<(), DisplayError> {
        let (height, clamped) = bar::clamp_height(height);
        if clamped {
            #[cfg(feature = "defmt")]
            defmt::warn!("glcd: bar height clamped to {}", height);
        }

        for chip in Chip::ALL {
            let plan = bar::plan_half(height, chip, self.bar.mirror);
            self.run(&plan)?;
        }
        Ok(())
    }

    /// Zero both bar pages on both halves
    pub fn clear_signal_bar(&mut self) -> Result<(), DisplayError> {
        self.run(&bar::plan_clear())
    }

    /// Turn both controllers' output on or off (RAM is kept)
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        let command = if on {
            Command::DisplayOn
        } else {
            Command::DisplayOff
        };
        for chip in Chip::ALL {
            self.bus.select_chip(Some(chip))?;
            self.bus.write_command(command)?;
        }
        Ok(())
    }

    /// Direct access to the bus
    pub fn bus_mut(&mut self) -> &mut Ks0108Bus<C, D, DL> {
        &mut self.bus
    }

    /// Give the banks and the delay back
    pub fn release(self) -> (C, D, DL) {
        self.bus.release()
    }

    fn run(&mut self, plan: &BarPlan) -> Result<(), DisplayError> {
        for op in plan {
            match *op {
                BarOp::GoTo { page, column } => {
                    self.go_to(page, column)?;
                }
                BarOp::Fill { pattern, count } => self.fill(pattern, count)?,
            }
        }
        Ok(())
    }

    /// Write `count` copies of `byte` from the current cursor
    fn fill(&mut self, byte: u8, count: u8) -> Result<(), DisplayError> {
        for _ in 0..count {
            self.bus.write_data(byte)?;
        }
        Ok(())
    }
}

impl<C, D, DL> MeterDisplay for Glcd<C, D, DL>
where
    C: PinBank,
    D: PinBank,
    DL: DelayNs,
{
    fn clear_screen(&mut self) -> Result<(), DisplayError> {
        Glcd::clear_screen(self)
    }

    fn write_string(
        &mut self,
        page: u8,
        column: u8,
        text: &str,
    ) -> Result<LayoutSummary, DisplayError> {
        Glcd::write_string(self, page, column, text)
    }

    fn write_percentage_label(&mut self, text: &str) -> Result<LayoutSummary, DisplayError> {
        Glcd::write_percentage_label(self, text)
    }

    fn draw_signal_bar(&mut self, height: u8) -> Result<(), DisplayError> {
        Glcd::draw_signal_bar(self, height)
    }
}
