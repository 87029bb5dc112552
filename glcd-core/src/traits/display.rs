//! Display trait for the duty meter

use crate::geometry::Chip;
use crate::layout::LayoutSummary;
use crate::meter::MeterReading;
use crate::text::percent_label;

/// Errors that can occur while driving the panel
///
/// Malformed coordinates, unsupported characters and text overflow are not
/// errors: they are reported through status values and drawing continues.
/// The only failure is a controller that never clears its busy flag, and it
/// is only reported when polling is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The busy flag was still set after the allowed number of polls
    BusyTimeout {
        /// Chip selected while polling, if any
        chip: Option<Chip>,
        /// Busy reads observed
        polls: u32,
    },
}

/// Drawing operations the duty meter needs
pub trait MeterDisplay {
    /// Clear both halves of the panel
    fn clear_screen(&mut self) -> Result<(), DisplayError>;

    /// Draw text at a logical page and column
    ///
    /// Text wraps over the controller seam and stops at the right edge.
    fn write_string(
        &mut self,
        page: u8,
        column: u8,
        text: &str,
    ) -> Result<LayoutSummary, DisplayError>;

    /// Erase and redraw the percentage label
    fn write_percentage_label(&mut self, text: &str) -> Result<LayoutSummary, DisplayError>;

    /// Draw the signal bar at `height` pixels (0-64), hold it, then erase it
    fn draw_signal_bar(&mut self, height: u8) -> Result<(), DisplayError>;
}

/// Helper for showing a complete meter reading
pub trait MeterDisplayExt: MeterDisplay {
    /// Redraw the percentage label and the bar for a reading
    fn show_reading(&mut self, reading: &MeterReading) -> Result<(), DisplayError> {
        let label = percent_label(reading.percent);
        self.write_percentage_label(&label)?;
        self.draw_signal_bar(reading.bar_height)
    }
}

// Blanket implementation for all MeterDisplay types
impl<T: MeterDisplay> MeterDisplayExt for T {}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::{String, ToString};
    use std::vec::Vec;

    use super::*;

    /// Records drawing calls instead of touching hardware
    #[derive(Default)]
    struct RecordingDisplay {
        labels: Vec<String>,
        bars: Vec<u8>,
    }

    impl MeterDisplay for RecordingDisplay {
        fn clear_screen(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn write_string(
            &mut self,
            _page: u8,
            _column: u8,
            _text: &str,
        ) -> Result<LayoutSummary, DisplayError> {
            Ok(LayoutSummary::default())
        }

        fn write_percentage_label(&mut self, text: &str) -> Result<LayoutSummary, DisplayError> {
            self.labels.push(text.to_string());
            Ok(LayoutSummary::default())
        }

        fn draw_signal_bar(&mut self, height: u8) -> Result<(), DisplayError> {
            self.bars.push(height);
            Ok(())
        }
    }

    #[test]
    fn test_show_reading() {
        let mut display = RecordingDisplay::default();
        display
            .show_reading(&MeterReading::from_sample(512))
            .unwrap();
        assert_eq!(display.labels, ["50%"]);
        assert_eq!(display.bars, [32]);
    }
}
