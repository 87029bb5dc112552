//! glcd - PWM duty meter firmware
//!
//! Reads a potentiometer on the ADC, drives a PWM output at the matching
//! duty and shows the duty on a 128x64 KS0108 panel as a percentage and
//! a signal bar.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::gpio::{Flex, Pull};
use embassy_rp::pwm::Pwm;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use glcd_core::config::{GlcdConfig, LabelConfig};
use glcd_drivers::{DutyMeter, Glcd};

mod board;

use board::{AdcSampler, FlexBank, PwmChannel};

/// Driver configuration for the reference board
fn glcd_config() -> GlcdConfig {
    GlcdConfig {
        // Erase only up to the panel edge so the caption survives
        label: LabelConfig {
            clear_width: 28,
            ..LabelConfig::default()
        },
        ..GlcdConfig::default()
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("glcd firmware starting...");

    let p = embassy_rp::init(Default::default());

    let data = FlexBank::new([
        Flex::new(p.PIN_0),
        Flex::new(p.PIN_1),
        Flex::new(p.PIN_2),
        Flex::new(p.PIN_3),
        Flex::new(p.PIN_4),
        Flex::new(p.PIN_5),
        Flex::new(p.PIN_6),
        Flex::new(p.PIN_7),
    ]);
    // Order matches ControlPins::default(): RS, RW, E, CS1, CS2, RST
    let control = FlexBank::new([
        Flex::new(p.PIN_8),
        Flex::new(p.PIN_9),
        Flex::new(p.PIN_10),
        Flex::new(p.PIN_11),
        Flex::new(p.PIN_12),
        Flex::new(p.PIN_13),
    ]);

    let mut glcd = Glcd::new(control, data, Delay, glcd_config());
    if let Err(e) = glcd.init() {
        error!("Display init failed: {:?}", e);
    }
    info!("Display initialized");

    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let channel = Channel::new_pin(p.PIN_26, Pull::None);
    let sampler = AdcSampler::new(adc, channel);

    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmChannel::config());
    let pwm = PwmChannel::new(pwm, PwmChannel::config());

    let mut meter = DutyMeter::new(sampler, pwm, glcd);
    if let Err(e) = meter.show_caption() {
        warn!("Caption draw failed: {:?}", e);
    }

    // The bar hold time paces the loop
    loop {
        match meter.tick() {
            Ok(reading) => trace!("duty {}%", reading.percent),
            Err(e) => warn!("Display error: {:?}", e),
        }
    }
}
