//! Button configuration type definitions
//!
//! All durations are in milliseconds. No ordering between thresholds is
//! enforced: inverted thresholds give a well-defined (if surprising)
//! classification, and choosing sensible values is up to the caller.

use periph_hal::ActiveLevel;

use crate::button::{ButtonMode, PressEvent};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default settle time before a press is trusted
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Toggle-mode duration bands and double-click window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToggleTiming {
    /// Maximum gap between two releases for a double-click (0 disables it)
    pub double_click_gap_ms: u32,
    /// Shortest press reported as [`PressEvent::Normal`]
    pub normal_ms: u32,
    /// Shortest press reported as [`PressEvent::Long`]
    pub long_ms: u32,
    /// Shortest press reported as [`PressEvent::VeryLong`]
    pub very_long_ms: u32,
}

impl Default for ToggleTiming {
    fn default() -> Self {
        Self {
            double_click_gap_ms: 0,
            normal_ms: 300,
            long_ms: 1000,
            very_long_ms: 3000,
        }
    }
}

impl ToggleTiming {
    /// Classify a completed press by its duration
    ///
    /// Thresholds are checked from longest to shortest with `>=`, so a
    /// duration equal to a threshold lands in the longer band.
    pub fn classify(&self, duration_ms: u32) -> PressEvent {
        if duration_ms >= self.very_long_ms {
            PressEvent::VeryLong
        } else if duration_ms >= self.long_ms {
            PressEvent::Long
        } else if duration_ms >= self.normal_ms {
            PressEvent::Normal
        } else {
            PressEvent::OnPressed
        }
    }

    /// Whether double-click detection is enabled
    pub fn double_click_enabled(&self) -> bool {
        self.double_click_gap_ms > 0
    }
}

/// Hold-mode repeat cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HoldTiming {
    /// Hold time (from the first raw press) before repeating starts
    pub repeat_delay_ms: u32,
    /// Time between repeats once repeating
    pub repeat_interval_ms: u32,
}

impl Default for HoldTiming {
    fn default() -> Self {
        Self {
            repeat_delay_ms: 500,
            repeat_interval_ms: 200,
        }
    }
}

/// Complete timing set for one button
///
/// Both mode sections are always present; the one not matching the
/// button's mode is simply never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonTiming {
    /// Settle time before a press is trusted
    pub debounce_ms: u32,
    /// Toggle-mode bands
    pub toggle: ToggleTiming,
    /// Hold-mode cadence
    pub hold: HoldTiming,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            toggle: ToggleTiming::default(),
            hold: HoldTiming::default(),
        }
    }
}

/// Everything needed to register a button except its pin and handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Classification mode
    pub mode: ButtonMode,
    /// Electrical level that means "pressed"
    pub active_level: ActiveLevel,
    /// Debounce and mode timing
    pub timing: ButtonTiming,
}

impl ButtonConfig {
    /// Toggle-mode button with default timing
    pub fn toggle(active_level: ActiveLevel) -> Self {
        Self {
            mode: ButtonMode::Toggle,
            active_level,
            timing: ButtonTiming::default(),
        }
    }

    /// Hold-mode button with default timing
    pub fn hold(active_level: ActiveLevel) -> Self {
        Self {
            mode: ButtonMode::Hold,
            active_level,
            timing: ButtonTiming::default(),
        }
    }
}
