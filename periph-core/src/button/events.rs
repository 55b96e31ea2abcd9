//! Press events and button modes

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classified press reported to a button's handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressEvent {
    /// Toggle: press shorter than the normal threshold
    OnPressed,
    /// Toggle: press at least as long as the normal threshold
    Normal,
    /// Toggle: press at least as long as the long threshold
    Long,
    /// Toggle: press at least as long as the very-long threshold
    VeryLong,
    /// Toggle: two releases within the double-click gap
    Double,
    /// Hold: held past the repeat delay, then once per repeat interval
    Repeat,
    /// Hold: fired once when the press is confirmed
    RepeatOnce,
}

/// How a button's presses are classified
///
/// Fixed for the lifetime of a registered button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ButtonMode {
    /// One event per press/release cycle, chosen by duration or double-click
    #[default]
    Toggle,
    /// One event on press, then periodic repeats while held
    Hold,
}

/// Raw mode value outside the recognized set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidMode(pub u8);

impl TryFrom<u8> for ButtonMode {
    type Error = InvalidMode;

    /// `0` is Toggle, `1` is Hold
    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ButtonMode::Toggle),
            1 => Ok(ButtonMode::Hold),
            other => Err(InvalidMode(other)),
        }
    }
}
