//! GPIO adapters for embassy-stm32 pins

use embassy_stm32::gpio::{Input, Output};
use periph_hal::{InputPin, OutputPin};

/// Configured input pin (pull-up/pull-down chosen at construction)
pub struct Stm32Input<'d>(Input<'d>);

impl<'d> Stm32Input<'d> {
    /// Wrap an embassy input
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }

    /// Unwrap back into the embassy input
    pub fn into_inner(self) -> Input<'d> {
        self.0
    }
}

impl InputPin for Stm32Input<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Push-pull output pin
pub struct Stm32Output<'d>(Output<'d>);

impl<'d> Stm32Output<'d> {
    /// Wrap an embassy output
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }

    /// Flip the pin level
    pub fn toggle(&mut self) {
        self.0.toggle();
    }

    /// Unwrap back into the embassy output
    pub fn into_inner(self) -> Output<'d> {
        self.0
    }
}

impl OutputPin for Stm32Output<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}
