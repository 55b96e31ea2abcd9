//! Per-button press classification state machine
//!
//! The machine is stepped once per polling tick. It never blocks and keeps
//! only timestamps, so the polling rate only bounds its resolution: every
//! configured window should span several ticks.
//!
//! ```text
//!            pressed                 window elapsed
//!   Start ────────────▶ Debounce ───────────────────▶ Pressed
//!     ▲                    │  still pressed              │
//!     │   released (bounce)│                             │ released
//!     ├────────────────────┘                             │
//!     └──────────────────────────────────────────────────┘
//! ```
//!
//! Toggle mode classifies on release. With a double-click window configured
//! the classification is held back until either a second release lands in
//! the window (reported as [`PressEvent::Double`]) or the window expires.
//! Hold mode reports [`PressEvent::RepeatOnce`] on entering `Pressed` and
//! [`PressEvent::Repeat`] while held, with nothing on release.

use periph_hal::{elapsed_ms, Millis};

use super::events::{ButtonMode, PressEvent};
use crate::config::{ButtonTiming, HoldTiming, ToggleTiming};

/// Position of a button in its press cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Released, waiting for a press
    Start,
    /// Raw press seen, waiting for the debounce window to elapse
    Debounce,
    /// Press confirmed
    Pressed,
}

/// Press classifier for a single button
#[derive(Debug, Clone)]
pub struct ButtonMachine {
    mode: ButtonMode,
    state: ButtonState,
    timing: ButtonTiming,
    /// Tick of the first raw press of the current cycle
    press_start: Millis,
    /// Duration of the press waiting on the double-click window
    last_press_duration: u32,
    first_click_pending: bool,
    first_click_release: Millis,
    repeat_active: bool,
    last_repeat: Millis,
}

impl ButtonMachine {
    /// Create a machine with default timing
    pub fn new(mode: ButtonMode) -> Self {
        Self::with_timing(mode, ButtonTiming::default())
    }

    /// Create a machine with explicit timing
    pub fn with_timing(mode: ButtonMode, timing: ButtonTiming) -> Self {
        Self {
            mode,
            state: ButtonState::Start,
            timing,
            press_start: 0,
            last_press_duration: 0,
            first_click_pending: false,
            first_click_release: 0,
            repeat_active: false,
            last_repeat: 0,
        }
    }

    pub fn mode(&self) -> ButtonMode {
        self.mode
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn timing(&self) -> &ButtonTiming {
        &self.timing
    }

    /// Whether a Toggle-mode click is waiting on the double-click window
    pub fn is_click_pending(&self) -> bool {
        self.first_click_pending
    }

    /// Whether Hold-mode repeating has started for the current press
    pub fn is_repeating(&self) -> bool {
        self.repeat_active
    }

    pub fn set_debounce(&mut self, debounce_ms: u32) {
        self.timing.debounce_ms = debounce_ms;
    }

    /// Set Hold-mode cadence; stored but unused in Toggle mode
    pub fn set_hold_timing(&mut self, hold: HoldTiming) {
        self.timing.hold = hold;
    }

    /// Set Toggle-mode bands; stored but unused in Hold mode
    pub fn set_toggle_timing(&mut self, toggle: ToggleTiming) {
        self.timing.toggle = toggle;
    }

    /// Advance the machine by one polling tick
    ///
    /// `pressed` is the raw reading already mapped through the button's
    /// active level. `emit` is called for every event this tick produces,
    /// in order.
    pub fn step<F: FnMut(PressEvent)>(&mut self, pressed: bool, now: Millis, mut emit: F) {
        match self.state {
            ButtonState::Start => {
                if pressed {
                    self.press_start = now;
                    self.state = ButtonState::Debounce;
                }
            }
            ButtonState::Debounce => {
                if elapsed_ms(now, self.press_start) >= self.timing.debounce_ms {
                    if pressed {
                        self.state = ButtonState::Pressed;
                        self.last_repeat = now;
                        if self.mode == ButtonMode::Hold {
                            emit(PressEvent::RepeatOnce);
                        }
                    } else {
                        crate::trace!("press rejected as bounce");
                        self.state = ButtonState::Start;
                    }
                }
            }
            ButtonState::Pressed => {
                if !pressed {
                    if self.mode == ButtonMode::Toggle {
                        self.release_toggle(now, &mut emit);
                    }
                    self.state = ButtonState::Start;
                    self.repeat_active = false;
                } else if self.mode == ButtonMode::Hold {
                    self.repeat_hold(now, &mut emit);
                }
            }
        }

        if self.mode == ButtonMode::Toggle {
            self.expire_pending_click(now, &mut emit);
        }
    }

    fn release_toggle<F: FnMut(PressEvent)>(&mut self, now: Millis, emit: &mut F) {
        let toggle = self.timing.toggle;
        let duration = elapsed_ms(now, self.press_start);

        if !toggle.double_click_enabled() {
            // A click left over from before the window was disabled goes first
            if self.first_click_pending {
                self.first_click_pending = false;
                emit(toggle.classify(self.last_press_duration));
            }
            emit(toggle.classify(duration));
            return;
        }

        if self.first_click_pending {
            if elapsed_ms(now, self.first_click_release) <= toggle.double_click_gap_ms {
                self.first_click_pending = false;
                emit(PressEvent::Double);
                return;
            }
            // Window already closed without a sweep: report the old click,
            // the new one becomes the pending first click
            emit(toggle.classify(self.last_press_duration));
        }

        self.first_click_pending = true;
        self.first_click_release = now;
        self.last_press_duration = duration;
    }

    fn repeat_hold<F: FnMut(PressEvent)>(&mut self, now: Millis, emit: &mut F) {
        let hold = self.timing.hold;

        if !self.repeat_active {
            if elapsed_ms(now, self.press_start) >= hold.repeat_delay_ms {
                self.repeat_active = true;
                self.last_repeat = now;
                emit(PressEvent::Repeat);
            }
        } else if elapsed_ms(now, self.last_repeat) >= hold.repeat_interval_ms {
            self.last_repeat = now;
            emit(PressEvent::Repeat);
        }
    }

    fn expire_pending_click<F: FnMut(PressEvent)>(&mut self, now: Millis, emit: &mut F) {
        if !self.first_click_pending {
            return;
        }

        let toggle = self.timing.toggle;
        if elapsed_ms(now, self.first_click_release) > toggle.double_click_gap_ms {
            self.first_click_pending = false;
            emit(toggle.classify(self.last_press_duration));
        }
    }
}
