//! PWM duty meter
//!
//! Ties the three collaborators together: a 10-bit analog sample sets the
//! PWM duty and is shown as a percentage label plus a signal bar.
//!
//! # Usage
//!
//! ```ignore
//! let mut meter = DutyMeter::new(adc, pwm, glcd);
//! meter.show_caption()?;
//! loop {
//!     meter.tick()?;
//! }
//! ```

use glcd_core::layout::LayoutSummary;
use glcd_core::meter::MeterReading;
use glcd_core::traits::{DisplayError, MeterDisplay, MeterDisplayExt};
use glcd_hal::analog::{AnalogSampler, PwmOutput};

/// Caption drawn once above the readout
pub const CAPTION: &str = "PWM Duty Cycle:";

/// Caption position (page, column)
pub const CAPTION_POSITION: (u8, u8) = (0, 2);

/// Sample-to-display loop
pub struct DutyMeter<S, P, G> {
    sampler: S,
    pwm: P,
    display: G,
    last: Option<MeterReading>,
}

impl<S, P, G> DutyMeter<S, P, G>
where
    S: AnalogSampler,
    P: PwmOutput,
    G: MeterDisplay,
{
    pub fn new(sampler: S, pwm: P, display: G) -> Self {
        Self {
            sampler,
            pwm,
            display,
            last: None,
        }
    }

    /// Draw the static caption
    pub fn show_caption(&mut self) -> Result<LayoutSummary, DisplayError> {
        let (page, column) = CAPTION_POSITION;
        self.display.write_string(page, column, CAPTION)
    }

    /// Sample once, update the PWM duty and redraw the readout
    ///
    /// Blocks for the bar hold time.
    pub fn tick(&mut self) -> Result<MeterReading, DisplayError> {
        let reading = MeterReading::from_sample(self.sampler.read_sample());
        self.pwm.set_duty(reading.duty);
        self.display.show_reading(&reading)?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "meter: sample={} duty={} percent={}",
            reading.sample,
            reading.duty,
            reading.percent
        );

        self.last = Some(reading);
        Ok(reading)
    }

    /// Most recent reading, if any
    pub fn last_reading(&self) -> Option<MeterReading> {
        self.last
    }

    /// Access the display
    pub fn display_mut(&mut self) -> &mut G {
        &mut self.display
    }

    /// Give the collaborators back
    pub fn release(self) -> (S, P, G) {
        (self.sampler, self.pwm, self.display)
    }
}
