//! Duty meter scaling
//!
//! The meter turns a 10-bit analog sample into the three values it shows:
//! an 8-bit PWM duty, a whole percentage, and a bar height in pixels.

use crate::bar::BAR_MAX;

/// Largest 10-bit sample
pub const SAMPLE_MAX: u16 = 1023;

/// Values derived from one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeterReading {
    /// Sample as read (clamped to 0-1023)
    pub sample: u16,
    /// PWM duty (0-255)
    pub duty: u8,
    /// Whole percent of full scale (0-100), truncated
    pub percent: u8,
    /// Bar height in pixels (0-64), rounded
    pub bar_height: u8,
}

impl MeterReading {
    /// Derive every displayed value from a sample
    pub fn from_sample(sample: u16) -> Self {
        let sample = sample.min(SAMPLE_MAX);
        Self {
            sample,
            duty: duty_from_sample(sample),
            percent: percent_from_sample(sample),
            bar_height: bar_height_from_sample(sample),
        }
    }
}

/// 10-bit sample to 8-bit duty (drop the two low bits)
pub fn duty_from_sample(sample: u16) -> u8 {
    (sample.min(SAMPLE_MAX) / 4) as u8
}

/// Sample as a truncated percentage of full scale
pub fn percent_from_sample(sample: u16) -> u8 {
    let sample = sample.min(SAMPLE_MAX) as u32;
    (sample * 100 / SAMPLE_MAX as u32) as u8
}

/// Sample as a bar height, rounded half up
pub fn bar_height_from_sample(sample: u16) -> u8 {
    let sample = sample.min(SAMPLE_MAX) as u32;
    let full = SAMPLE_MAX as u32;
    ((sample * BAR_MAX as u32 * 2 + full) / (full * 2)) as u8
}
