//! Analog input and PWM output abstractions
//!
//! The meter reads a single analog channel and mirrors it onto a PWM
//! output. Both peripherals are external to the panel driver; these traits
//! are their whole interface.

/// Source of 10-bit analog samples
///
/// Implementations start a conversion and block until it completes.
/// Hardware with a wider converter must scale down to 10 bits.
pub trait AnalogSampler {
    /// Read the current sample (0-1023)
    fn read_sample(&mut self) -> u16;
}

/// PWM output with an 8-bit duty cycle
pub trait PwmOutput {
    /// Set the duty cycle (0 = always low, 255 = always high)
    fn set_duty(&mut self, duty: u8);
}

impl<T: AnalogSampler + ?Sized> AnalogSampler for &mut T {
    fn read_sample(&mut self) -> u16 {
        (**self).read_sample()
    }
}

impl<T: PwmOutput + ?Sized> PwmOutput for &mut T {
    fn set_duty(&mut self, duty: u8) {
        (**self).set_duty(duty);
    }
}
