//! Bus wiring and timing

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Data line carrying the busy flag (DB7)
pub const BUSY_FLAG_PIN: u8 = 7;

/// Control line assignment on the control bank (pin numbers 0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlPins {
    /// Register select (low = command, high = data)
    pub rs: u8,
    /// Read/write (low = write, high = read)
    pub rw: u8,
    /// Enable strobe
    pub enable: u8,
    /// Chip select for the left controller
    pub cs1: u8,
    /// Chip select for the right controller
    pub cs2: u8,
    /// Reset (active low)
    pub reset: u8,
}

impl Default for ControlPins {
    fn default() -> Self {
        Self {
            rs: 0,
            rw: 1,
            enable: 2,
            cs1: 3,
            cs2: 4,
            reset: 5,
        }
    }
}

impl ControlPins {
    /// All control pins, in configuration order
    pub fn all(&self) -> [u8; 6] {
        [self.rs, self.rw, self.enable, self.cs1, self.cs2, self.reset]
    }

    /// Check that every pin is on the bank and no pin is used twice
    pub fn is_valid(&self) -> bool {
        let pins = self.all();
        pins.iter().all(|&pin| pin < 8)
            && pins
                .iter()
                .enumerate()
                .all(|(i, pin)| !pins[i + 1..].contains(pin))
    }
}

/// Level that selects a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChipSelectPolarity {
    /// CS high selects (reference board)
    #[default]
    ActiveHigh,
    /// CS low selects (most bare KS0108 modules)
    ActiveLow,
}

impl ChipSelectPolarity {
    /// Pin level for a selected (`true`) or deselected chip
    pub fn level(self, selected: bool) -> bool {
        match self {
            ChipSelectPolarity::ActiveHigh => selected,
            ChipSelectPolarity::ActiveLow => !selected,
        }
    }
}

/// Bus timing
///
/// These are lower bounds for the panel controller; they depend on the
/// controller variant and must be met at the target clock rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusTiming {
    /// Enable high (and low) hold time in nanoseconds
    pub enable_pulse_ns: u32,
    /// Time reset is held low in milliseconds
    pub reset_pulse_ms: u32,
    /// Settle time after releasing reset in milliseconds
    pub reset_settle_ms: u32,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self {
            enable_pulse_ns: 1_000,
            reset_pulse_ms: 10,
            reset_settle_ms: 10,
        }
    }
}

/// Busy-flag polling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BusyPolicy {
    /// Poll until the controller reports ready; a dead controller hangs
    #[default]
    Forever,
    /// Give up after `max_polls` busy reads
    Bounded { max_polls: u32 },
}

impl BusyPolicy {
    /// Check if `polls` busy reads exhaust this policy
    pub fn exhausted(self, polls: u32) -> bool {
        match self {
            BusyPolicy::Forever => false,
            BusyPolicy::Bounded { max_polls } => polls >= max_polls,
        }
    }
}
