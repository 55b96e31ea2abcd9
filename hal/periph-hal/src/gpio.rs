//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
///
/// Reading must be free of side effects and must not block: drivers sample
/// inputs at arbitrary rates from their polling loops.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Electrical level that means "asserted" for an input
///
/// A button wired to ground with a pull-up reads low when pressed
/// ([`ActiveLevel::Low`]); one wired to VCC with a pull-down reads high
/// ([`ActiveLevel::High`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActiveLevel {
    /// Asserted when the pin reads low (pull-up wiring)
    #[default]
    Low,
    /// Asserted when the pin reads high (pull-down wiring)
    High,
}

impl ActiveLevel {
    /// Whether `pin` currently reads the asserted level
    pub fn is_active<P: InputPin + ?Sized>(self, pin: &P) -> bool {
        pin.is_high() == (self == ActiveLevel::High)
    }
}

impl From<bool> for ActiveLevel {
    /// `true` selects active-high, `false` active-low
    fn from(high: bool) -> Self {
        if high {
            ActiveLevel::High
        } else {
            ActiveLevel::Low
        }
    }
}
