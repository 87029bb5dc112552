//! Decimal text helpers
//!
//! Fixed-capacity formatting for the numbers shown on the panel. No
//! allocation, no locale, no sign.

use core::fmt::Write;

use heapless::String;

/// Capacity for any `u32` in decimal
pub const DECIMAL_CAPACITY: usize = 10;

/// Capacity for a percentage label ("100%")
pub const PERCENT_CAPACITY: usize = 5;

/// Format an unsigned integer in decimal
///
/// Zero is `"0"`; other values carry no leading zeros.
pub fn format_decimal(value: u32) -> String<DECIMAL_CAPACITY> {
    let mut text = String::new();
    // Ten digits always fit
    let _ = write!(text, "{}", value);
    text
}

/// Build the percentage label shown next to the bar, e.g. `"42%"`
///
/// Values above 100 are clamped.
pub fn percent_label(percent: u8) -> String<PERCENT_CAPACITY> {
    let mut text = String::new();
    let _ = write!(text, "{}%", percent.min(100));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_decimal(0).as_str(), "0");
    }

    #[test]
    fn test_no_leading_zero_or_sign() {
        assert_eq!(format_decimal(42).as_str(), "42");
        assert_eq!(format_decimal(100).as_str(), "100");
        assert_eq!(format_decimal(7).as_str(), "7");
    }

    #[test]
    fn test_widest_value() {
        assert_eq!(format_decimal(u32::MAX).as_str(), "4294967295");
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(0).as_str(), "0%");
        assert_eq!(percent_label(42).as_str(), "42%");
        assert_eq!(percent_label(100).as_str(), "100%");
        assert_eq!(percent_label(250).as_str(), "100%");
    }
}
