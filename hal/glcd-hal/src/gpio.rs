//! GPIO bank abstractions
//!
//! The panel bus is wired as whole 8-bit banks: one bank carries the
//! control lines, another the data lines. A [`PinBank`] value represents
//! one such bank, so the operations take no bank argument.

/// Logic level of a single pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if the level is high
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if the level is low
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Pin is sampled
    Input,
    /// Pin is driven
    Output,
}

/// Direction mask with every pin of a bank as input
pub const ALL_INPUT: u8 = 0x00;

/// Direction mask with every pin of a bank as output
pub const ALL_OUTPUT: u8 = 0xFF;

/// 8-bit I/O bank
///
/// Implementations handle the register manipulation for the specific chip.
/// The operations cannot fail: they map onto plain register accesses.
///
/// A bank shared as a half-duplex bus must be switched to input before it is
/// read and back to output before the next write. Callers own that ordering.
pub trait PinBank {
    /// Set the direction of every pin at once (bit set = output)
    fn set_port_direction(&mut self, mask: u8);

    /// Set the direction of a single pin (0-7)
    fn set_pin_direction(&mut self, pin: u8, direction: Direction);

    /// Drive all eight pins from `value` (bit 0 = pin 0)
    fn write_port(&mut self, value: u8);

    /// Drive a single pin (0-7)
    fn write_pin(&mut self, pin: u8, level: Level);

    /// Sample a single pin (0-7)
    fn read_pin(&mut self, pin: u8) -> Level;

    /// Drive a single pin high
    fn set_pin_high(&mut self, pin: u8) {
        self.write_pin(pin, Level::High);
    }

    /// Drive a single pin low
    fn set_pin_low(&mut self, pin: u8) {
        self.write_pin(pin, Level::Low);
    }

    /// Check if a single pin reads high
    fn is_pin_high(&mut self, pin: u8) -> bool {
        self.read_pin(pin).is_high()
    }
}

impl<T: PinBank + ?Sized> PinBank for &mut T {
    fn set_port_direction(&mut self, mask: u8) {
        (**self).set_port_direction(mask);
    }

    fn set_pin_direction(&mut self, pin: u8, direction: Direction) {
        (**self).set_pin_direction(pin, direction);
    }

    fn write_port(&mut self, value: u8) {
        (**self).write_port(value);
    }

    fn write_pin(&mut self, pin: u8, level: Level) {
        (**self).write_pin(pin, level);
    }

    fn read_pin(&mut self, pin: u8) -> Level {
        (**self).read_pin(pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Register-level bank model for testing the provided methods
    struct MockBank {
        ddr: u8,
        port: u8,
        pins: u8,
    }

    impl MockBank {
        fn new() -> Self {
            Self {
                ddr: 0,
                port: 0,
                pins: 0,
            }
        }
    }

    impl PinBank for MockBank {
        fn set_port_direction(&mut self, mask: u8) {
            self.ddr = mask;
        }

        fn set_pin_direction(&mut self, pin: u8, direction: Direction) {
            match direction {
                Direction::Output => self.ddr |= 1 << pin,
                Direction::Input => self.ddr &= !(1 << pin),
            }
        }

        fn write_port(&mut self, value: u8) {
            self.port = value;
        }

        fn write_pin(&mut self, pin: u8, level: Level) {
            if level.is_high() {
                self.port |= 1 << pin;
            } else {
                self.port &= !(1 << pin);
            }
        }

        fn read_pin(&mut self, pin: u8) -> Level {
            Level::from(self.pins & (1 << pin) != 0)
        }
    }

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(Level::High.is_high());
        assert!(Level::Low.is_low());
    }

    #[test]
    fn test_pin_helpers() {
        let mut bank = MockBank::new();
        bank.set_pin_high(3);
        bank.set_pin_high(5);
        assert_eq!(bank.port, 0b0010_1000);

        bank.set_pin_low(3);
        assert_eq!(bank.port, 0b0010_0000);

        bank.pins = 0x80;
        assert!(bank.is_pin_high(7));
        assert!(!bank.is_pin_high(0));
    }

    #[test]
    fn test_direction_mask() {
        let mut bank = MockBank::new();
        bank.set_port_direction(ALL_OUTPUT);
        bank.set_pin_direction(7, Direction::Input);
        assert_eq!(bank.ddr, 0x7F);

        bank.set_port_direction(ALL_INPUT);
        bank.set_pin_direction(0, Direction::Output);
        assert_eq!(bank.ddr, 0x01);
    }

    #[test]
    fn test_forwarding_through_reference() {
        fn drive<B: PinBank>(mut bank: B) {
            bank.write_port(0xA5);
        }

        let mut bank = MockBank::new();
        drive(&mut bank);
        assert_eq!(bank.port, 0xA5);
    }
}
