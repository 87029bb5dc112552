//! RP2040 adapters for the glcd HAL traits
//!
//! Reference wiring:
//!
//! | Signal    | GPIO  |
//! |-----------|-------|
//! | DB0-DB7   | 0-7   |
//! | RS        | 8     |
//! | RW        | 9     |
//! | E         | 10    |
//! | CS1       | 11    |
//! | CS2       | 12    |
//! | RST       | 13    |
//! | PWM out   | 16    |
//! | ADC in    | 26    |

use defmt::*;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::{self, Flex};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use glcd_hal::analog::{AnalogSampler, PwmOutput};
use glcd_hal::gpio::{Direction, Level, PinBank};

/// Up to eight GPIOs addressed as one bank (bank pin n = `pins[n]`)
pub struct FlexBank<'d, const N: usize> {
    pins: [Flex<'d>; N],
}

impl<'d, const N: usize> FlexBank<'d, N> {
    pub fn new(pins: [Flex<'d>; N]) -> Self {
        Self { pins }
    }

    fn pin(&mut self, pin: u8) -> Option<&mut Flex<'d>> {
        self.pins.get_mut(pin as usize)
    }
}

impl<const N: usize> PinBank for FlexBank<'_, N> {
    fn set_port_direction(&mut self, mask: u8) {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            if mask & (1 << i) != 0 {
                pin.set_as_output();
            } else {
                pin.set_as_input();
            }
        }
    }

    fn set_pin_direction(&mut self, pin: u8, direction: Direction) {
        if let Some(pin) = self.pin(pin) {
            match direction {
                Direction::Output => pin.set_as_output(),
                Direction::Input => pin.set_as_input(),
            }
        }
    }

    fn write_port(&mut self, value: u8) {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            pin.set_level(gpio::Level::from(value & (1 << i) != 0));
        }
    }

    fn write_pin(&mut self, pin: u8, level: Level) {
        if let Some(pin) = self.pin(pin) {
            pin.set_level(gpio::Level::from(level.is_high()));
        }
    }

    fn read_pin(&mut self, pin: u8) -> Level {
        match self.pin(pin) {
            Some(pin) => Level::from(pin.is_high()),
            None => Level::Low,
        }
    }
}

/// Blocking ADC channel scaled to 10 bits
pub struct AdcSampler<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
    last: u16,
}

impl<'d> AdcSampler<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self {
            adc,
            channel,
            last: 0,
        }
    }
}

impl AnalogSampler for AdcSampler<'_> {
    fn read_sample(&mut self) -> u16 {
        // RP2040 conversions are 12-bit
        match self.adc.blocking_read(&mut self.channel) {
            Ok(raw) => self.last = raw >> 2,
            Err(_) => warn!("ADC read failed, reusing last sample"),
        }
        self.last
    }
}

/// PWM channel A with an 8-bit duty range
pub struct PwmChannel<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> PwmChannel<'d> {
    pub fn new(pwm: Pwm<'d>, config: PwmConfig) -> Self {
        Self { pwm, config }
    }

    /// PWM config with a top of 255 so the duty maps 1:1 to the compare value
    pub fn config() -> PwmConfig {
        let mut config = PwmConfig::default();
        config.top = u8::MAX as u16;
        config.compare_a = 0;
        config
    }
}

impl PwmOutput for PwmChannel<'_> {
    fn set_duty(&mut self, duty: u8) {
        self.config.compare_a = duty as u16;
        self.pwm.set_config(&self.config);
    }
}
