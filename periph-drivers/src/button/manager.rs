//! Button registry
//!
//! Owns a bounded, ordered set of buttons and steps all of them from a
//! single [`ButtonManager::update`] call placed in the main loop. The
//! manager is a plain value: create it where the loop lives, no globals.
//!
//! # Example
//!
//! ```ignore
//! let on_press = |id: ButtonId, event: PressEvent| { /* ... */ };
//! let mut buttons: ButtonManager<_> = ButtonManager::new(clock);
//! let id = buttons.register(&pin, ActiveLevel::Low, ButtonMode::Toggle, Some(&on_press))?;
//! buttons.set_toggle_timing(id, 100, 1000, 2000, 5000);
//!
//! loop {
//!     buttons.update();
//! }
//! ```

use heapless::Vec;

use periph_core::button::{ButtonMachine, ButtonMode, ButtonState, InvalidMode, PressEvent};
use periph_core::config::{ButtonConfig, HoldTiming, ToggleTiming};
use periph_core::{debug, trace, warn};
use periph_hal::{ActiveLevel, Clock, InputPin};

/// Registry size used when no capacity is given
pub const DEFAULT_CAPACITY: usize = 10;

/// Handle to a registered button
///
/// Stays valid until the button is removed; never reused while the
/// button it names is still registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(u16);

impl ButtonId {
    /// Raw handle value, for logging
    pub fn raw(self) -> u16 {
        self.0
    }
}

/// Callback receiving every classified press of one button
///
/// Runs synchronously inside [`ButtonManager::update`], so it should return
/// quickly: a slow handler delays every other button's timing for that tick.
pub type PressHandler<'a> = &'a dyn Fn(ButtonId, PressEvent);

fn ignore_press(_id: ButtonId, _event: PressEvent) {}

static IGNORE_PRESS: fn(ButtonId, PressEvent) = ignore_press;

/// Errors returned by registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Registry is at capacity
    Full,
    /// Raw mode value is not Toggle (0) or Hold (1)
    InvalidMode(u8),
}

impl From<InvalidMode> for RegisterError {
    fn from(err: InvalidMode) -> Self {
        RegisterError::InvalidMode(err.0)
    }
}

struct Button<'a> {
    id: ButtonId,
    pin: &'a dyn InputPin,
    active_level: ActiveLevel,
    machine: ButtonMachine,
    handler: PressHandler<'a>,
}

/// Bounded registry of polled buttons
///
/// `N` is the maximum number of buttons. Buttons are stepped in
/// registration order; removal shifts later buttons down so that order is
/// preserved.
pub struct ButtonManager<'a, C, const N: usize = DEFAULT_CAPACITY> {
    clock: C,
    buttons: Vec<Button<'a>, N>,
    next_id: u16,
}

impl<'a, C: Clock, const N: usize> ButtonManager<'a, C, N> {
    /// Handles are `u16`; a larger registry could run out of free ids
    const FITS_ID_SPACE: () = assert!(
        N <= u16::MAX as usize + 1,
        "ButtonManager capacity exceeds the u16 handle space"
    );

    /// Create an empty registry reading time from `clock`
    pub fn new(clock: C) -> Self {
        let () = Self::FITS_ID_SPACE;

        Self {
            clock,
            buttons: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a button with default timing for its mode
    ///
    /// With no handler, presses are classified and then dropped.
    pub fn register(
        &mut self,
        pin: &'a dyn InputPin,
        active_level: ActiveLevel,
        mode: ButtonMode,
        handler: Option<PressHandler<'a>>,
    ) -> Result<ButtonId, RegisterError> {
        self.insert(pin, active_level, ButtonMachine::new(mode), handler)
    }

    /// Register a button whose mode comes as a raw value (e.g. from stored settings)
    ///
    /// An unknown mode is refused without consuming a slot.
    pub fn register_raw(
        &mut self,
        pin: &'a dyn InputPin,
        active_level: ActiveLevel,
        raw_mode: u8,
        handler: Option<PressHandler<'a>>,
    ) -> Result<ButtonId, RegisterError> {
        let mode = ButtonMode::try_from(raw_mode).map_err(|err| {
            warn!("refusing button with unknown mode {}", raw_mode);
            RegisterError::from(err)
        })?;
        self.register(pin, active_level, mode, handler)
    }

    /// Register a button with a complete configuration
    pub fn register_with_config(
        &mut self,
        pin: &'a dyn InputPin,
        config: &ButtonConfig,
        handler: Option<PressHandler<'a>>,
    ) -> Result<ButtonId, RegisterError> {
        let machine = ButtonMachine::with_timing(config.mode, config.timing);
        self.insert(pin, config.active_level, machine, handler)
    }

    fn insert(
        &mut self,
        pin: &'a dyn InputPin,
        active_level: ActiveLevel,
        machine: ButtonMachine,
        handler: Option<PressHandler<'a>>,
    ) -> Result<ButtonId, RegisterError> {
        if self.buttons.is_full() {
            warn!("button registry full ({} buttons)", N);
            return Err(RegisterError::Full);
        }

        let id = self.allocate_id();
        let mode = machine.mode();
        let handler: PressHandler<'a> = match handler {
            Some(handler) => handler,
            None => &IGNORE_PRESS,
        };
        let button = Button {
            id,
            pin,
            active_level,
            machine,
            handler,
        };
        if self.buttons.push(button).is_err() {
            return Err(RegisterError::Full);
        }

        debug!("registered button {} ({:?})", id.0, mode);
        Ok(id)
    }

    fn allocate_id(&mut self) -> ButtonId {
        // At most N <= 65536 ids are live, so a free one is always found
        loop {
            let candidate = ButtonId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.contains(candidate) {
                return candidate;
            }
        }
    }

    /// Remove a button; unknown handles are ignored
    pub fn remove(&mut self, id: ButtonId) {
        if let Some(index) = self.position(id) {
            self.buttons.remove(index);
            debug!("removed button {}", id.0);
        }
    }

    /// Set the debounce window; takes effect on the next update
    pub fn set_debounce_window(&mut self, id: ButtonId, debounce_ms: u32) {
        if let Some(button) = self.get_mut(id) {
            button.machine.set_debounce(debounce_ms);
        }
    }

    /// Set Hold-mode repeat delay and interval
    ///
    /// Accepted on Toggle buttons too, where the values are never consulted.
    pub fn set_hold_timing(&mut self, id: ButtonId, repeat_delay_ms: u32, repeat_interval_ms: u32) {
        if let Some(button) = self.get_mut(id) {
            button.machine.set_hold_timing(HoldTiming {
                repeat_delay_ms,
                repeat_interval_ms,
            });
        }
    }

    /// Set Toggle-mode double-click gap and duration thresholds
    ///
    /// A gap of 0 disables double-click detection. Thresholds are not
    /// checked for ordering. Accepted on Hold buttons too, where the values
    /// are never consulted.
    pub fn set_toggle_timing(
        &mut self,
        id: ButtonId,
        double_click_gap_ms: u32,
        normal_ms: u32,
        long_ms: u32,
        very_long_ms: u32,
    ) {
        if let Some(button) = self.get_mut(id) {
            button.machine.set_toggle_timing(ToggleTiming {
                double_click_gap_ms,
                normal_ms,
                long_ms,
                very_long_ms,
            });
        }
    }

    /// Sample every button once and dispatch the resulting events
    ///
    /// Call on every iteration of the main loop. The clock is read once, so
    /// all buttons see the same tick. Handlers cannot reach the manager from
    /// inside this call, which keeps the registry stable while it is walked.
    pub fn update(&mut self) {
        let now = self.clock.now_ms();

        for button in self.buttons.iter_mut() {
            let pressed = button.active_level.is_active(button.pin);
            let id = button.id;
            let handler = button.handler;

            button.machine.step(pressed, now, |event| {
                trace!("button {}: {:?}", id.0, event);
                handler(id, event);
            });
        }
    }

    /// Number of registered buttons
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buttons.is_full()
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn contains(&self, id: ButtonId) -> bool {
        self.position(id).is_some()
    }

    /// Handles in registration order
    pub fn ids(&self) -> impl Iterator<Item = ButtonId> + '_ {
        self.buttons.iter().map(|b| b.id)
    }

    pub fn mode(&self, id: ButtonId) -> Option<ButtonMode> {
        self.get(id).map(|b| b.machine.mode())
    }

    pub fn state(&self, id: ButtonId) -> Option<ButtonState> {
        self.get(id).map(|b| b.machine.state())
    }

    fn position(&self, id: ButtonId) -> Option<usize> {
        self.buttons.iter().position(|b| b.id == id)
    }

    fn get(&self, id: ButtonId) -> Option<&Button<'a>> {
        self.buttons.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: ButtonId) -> Option<&mut Button<'a>> {
        self.buttons.iter_mut().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use periph_hal::Millis;

    struct MockPin {
        high: Cell<bool>,
    }

    impl MockPin {
        fn new(high: bool) -> Self {
            Self {
                high: Cell::new(high),
            }
        }
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.high.get()
        }
    }

    struct MockClock {
        now: Cell<Millis>,
    }

    impl Clock for MockClock {
        fn now_ms(&self) -> Millis {
            self.now.get()
        }
    }

    type Log = RefCell<Vec<(ButtonId, PressEvent), 64>>;

    fn record(log: &Log) -> impl Fn(ButtonId, PressEvent) + '_ {
        move |id, event| log.borrow_mut().push((id, event)).unwrap()
    }

    /// Advance the mock clock one millisecond at a time, updating each tick
    fn run<const N: usize>(
        manager: &mut ButtonManager<'_, &MockClock, N>,
        clock: &MockClock,
        ms: u32,
    ) {
        for _ in 0..ms {
            clock.now.set(clock.now.get().wrapping_add(1));
            manager.update();
        }
    }

    #[test]
    fn test_register_until_full() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(true);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let mut ids: Vec<ButtonId, DEFAULT_CAPACITY> = Vec::new();
        for _ in 0..DEFAULT_CAPACITY {
            let id = manager
                .register(&pin, ActiveLevel::Low, ButtonMode::Toggle, None)
                .unwrap();
            assert!(!ids.contains(&id));
            ids.push(id).unwrap();
        }

        assert!(manager.is_full());
        assert_eq!(
            manager.register(&pin, ActiveLevel::Low, ButtonMode::Hold, None),
            Err(RegisterError::Full)
        );
        assert_eq!(manager.len(), DEFAULT_CAPACITY);
        assert_eq!(manager.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_register_raw_rejects_unknown_mode() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(true);
        let mut manager: ButtonManager<_, 2> = ButtonManager::new(&clock);

        assert_eq!(
            manager.register_raw(&pin, ActiveLevel::Low, 7, None),
            Err(RegisterError::InvalidMode(7))
        );
        assert!(manager.is_empty());

        let id = manager.register_raw(&pin, ActiveLevel::Low, 1, None).unwrap();
        assert_eq!(manager.mode(id), Some(ButtonMode::Hold));
    }

    #[test]
    fn test_default_handler_is_silent() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(false);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let id = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Hold, None)
            .unwrap();
        run(&mut manager, &clock, 1000);

        assert_eq!(manager.state(id), Some(ButtonState::Pressed));
    }

    #[test]
    fn test_active_levels() {
        let clock = MockClock { now: Cell::new(0) };
        let low_pin = MockPin::new(false);
        let high_pin = MockPin::new(false);
        let log = Log::default();
        let handler = record(&log);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let low = manager
            .register(&low_pin, ActiveLevel::Low, ButtonMode::Hold, Some(&handler))
            .unwrap();
        let high = manager
            .register(&high_pin, ActiveLevel::High, ButtonMode::Hold, Some(&handler))
            .unwrap();

        // Both pins read low: only the active-low button is pressed
        run(&mut manager, &clock, 100);
        assert_eq!(log.borrow().as_slice(), &[(low, PressEvent::RepeatOnce)]);
        assert_eq!(manager.state(high), Some(ButtonState::Start));
    }

    #[test]
    fn test_toggle_classification_through_manager() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(true);
        let log = Log::default();
        let handler = record(&log);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let id = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Toggle, Some(&handler))
            .unwrap();

        pin.high.set(false);
        run(&mut manager, &clock, 500);
        pin.high.set(true);
        run(&mut manager, &clock, 10);

        assert_eq!(log.borrow().as_slice(), &[(id, PressEvent::Normal)]);
    }

    #[test]
    fn test_double_click_after_set_toggle_timing() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(true);
        let log = Log::default();
        let handler = record(&log);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let id = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Toggle, Some(&handler))
            .unwrap();
        manager.set_toggle_timing(id, 100, 300, 1000, 3000);

        for _ in 0..2 {
            pin.high.set(false);
            run(&mut manager, &clock, 60);
            pin.high.set(true);
            run(&mut manager, &clock, 20);
        }
        run(&mut manager, &clock, 500);

        assert_eq!(log.borrow().as_slice(), &[(id, PressEvent::Double)]);
    }

    #[test]
    fn test_hold_cadence_after_set_hold_timing() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(true);
        let log = Log::default();
        let handler = record(&log);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let id = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Hold, Some(&handler))
            .unwrap();
        manager.set_debounce_window(id, 20);
        manager.set_hold_timing(id, 1000, 100);

        // Pressed on tick 1, confirmed on tick 21, repeats from tick 1001
        pin.high.set(false);
        run(&mut manager, &clock, 1250);
        pin.high.set(true);
        run(&mut manager, &clock, 500);

        let log = log.borrow();
        assert_eq!(log[0], (id, PressEvent::RepeatOnce));
        let repeats = log.iter().filter(|(_, e)| *e == PressEvent::Repeat).count();
        assert_eq!(repeats, 3);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_remove_compacts_and_keeps_others_working() {
        let clock = MockClock { now: Cell::new(0) };
        let pins = [MockPin::new(true), MockPin::new(true), MockPin::new(true)];
        let log = Log::default();
        let handler = record(&log);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let a = manager
            .register(&pins[0], ActiveLevel::Low, ButtonMode::Toggle, Some(&handler))
            .unwrap();
        let b = manager
            .register(&pins[1], ActiveLevel::Low, ButtonMode::Toggle, Some(&handler))
            .unwrap();
        let c = manager
            .register(&pins[2], ActiveLevel::Low, ButtonMode::Toggle, Some(&handler))
            .unwrap();

        manager.remove(b);
        assert_eq!(manager.len(), 2);
        assert!(!manager.contains(b));
        let order: Vec<ButtonId, 3> = manager.ids().collect();
        assert_eq!(order.as_slice(), &[a, c]);

        // Removing again, or setting timing on the stale handle, does nothing
        manager.remove(b);
        manager.set_debounce_window(b, 0);
        assert_eq!(manager.len(), 2);

        for pin in &pins {
            pin.high.set(false);
        }
        run(&mut manager, &clock, 1500);
        for pin in &pins {
            pin.high.set(true);
        }
        run(&mut manager, &clock, 10);

        assert_eq!(
            log.borrow().as_slice(),
            &[(a, PressEvent::Long), (c, PressEvent::Long)]
        );
    }

    #[test]
    fn test_freed_slot_is_reusable() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(true);
        let mut manager: ButtonManager<_, 2> = ButtonManager::new(&clock);

        let a = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Toggle, None)
            .unwrap();
        let b = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Toggle, None)
            .unwrap();
        manager.remove(a);

        let c = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Hold, None)
            .unwrap();
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(manager.mode(c), Some(ButtonMode::Hold));
        assert_eq!(manager.mode(a), None);
    }

    #[test]
    fn test_id_allocation_skips_live_ids_after_wrap() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(true);
        let mut manager: ButtonManager<_, 3> = ButtonManager::new(&clock);

        let a = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Toggle, None)
            .unwrap();
        assert_eq!(a, ButtonId(0));

        manager.next_id = u16::MAX;
        let b = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Toggle, None)
            .unwrap();
        assert_eq!(b, ButtonId(u16::MAX));

        // Counter wrapped onto `a`, which is still registered
        let c = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Toggle, None)
            .unwrap();
        assert_eq!(c, ButtonId(1));
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_events_follow_registration_order() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(false);
        let log = Log::default();
        let handler = record(&log);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let first = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Hold, Some(&handler))
            .unwrap();
        let second = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Hold, Some(&handler))
            .unwrap();

        run(&mut manager, &clock, 60);
        assert_eq!(
            log.borrow().as_slice(),
            &[
                (first, PressEvent::RepeatOnce),
                (second, PressEvent::RepeatOnce)
            ]
        );
    }

    #[test]
    fn test_register_with_config() {
        let clock = MockClock { now: Cell::new(0) };
        let pin = MockPin::new(true);
        let log = Log::default();
        let handler = record(&log);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let mut config = ButtonConfig::toggle(ActiveLevel::High);
        config.timing.debounce_ms = 10;
        config.timing.toggle.normal_ms = 50;
        let id = manager
            .register_with_config(&pin, &config, Some(&handler))
            .unwrap();

        run(&mut manager, &clock, 80);
        pin.high.set(false);
        run(&mut manager, &clock, 5);

        assert_eq!(log.borrow().as_slice(), &[(id, PressEvent::Normal)]);
    }

    #[test]
    fn test_update_across_clock_wrap() {
        let clock = MockClock {
            now: Cell::new(u32::MAX - 200),
        };
        let pin = MockPin::new(true);
        let log = Log::default();
        let handler = record(&log);
        let mut manager: ButtonManager<_> = ButtonManager::new(&clock);

        let id = manager
            .register(&pin, ActiveLevel::Low, ButtonMode::Toggle, Some(&handler))
            .unwrap();

        pin.high.set(false);
        run(&mut manager, &clock, 1500);
        pin.high.set(true);
        run(&mut manager, &clock, 5);

        assert_eq!(log.borrow().as_slice(), &[(id, PressEvent::Long)]);
    }
}
