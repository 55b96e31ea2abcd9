//! Property tests for press classification

use periph_core::button::{ButtonMachine, ButtonMode, PressEvent};
use periph_core::config::ToggleTiming;
use proptest::prelude::*;

fn rank(event: PressEvent) -> u8 {
    match event {
        PressEvent::OnPressed => 0,
        PressEvent::Normal => 1,
        PressEvent::Long => 2,
        PressEvent::VeryLong => 3,
        other => panic!("not a duration band: {:?}", other),
    }
}

/// Ordered thresholds: normal < long < very_long
fn ordered_timing() -> impl Strategy<Value = ToggleTiming> {
    (1u32..2000, 1u32..2000, 1u32..2000).prop_map(|(a, b, c)| ToggleTiming {
        double_click_gap_ms: 0,
        normal_ms: a,
        long_ms: a + b,
        very_long_ms: a + b + c,
    })
}

/// Run one full press of `duration` ms and collect what it reports
fn press(machine: &mut ButtonMachine, base: u32, duration: u32, idle: u32) -> Vec<PressEvent> {
    let mut events = Vec::new();
    for offset in 0..duration {
        machine.step(true, base.wrapping_add(offset), |e| events.push(e));
    }
    for offset in duration..duration + idle {
        machine.step(false, base.wrapping_add(offset), |e| events.push(e));
    }
    events
}

proptest! {
    #[test]
    fn classification_is_monotonic(timing in ordered_timing(), a in 0u32..10_000, b in 0u32..10_000) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(timing.classify(short)) <= rank(timing.classify(long)));
    }

    #[test]
    fn thresholds_belong_to_the_longer_band(timing in ordered_timing()) {
        prop_assert_eq!(timing.classify(timing.normal_ms), PressEvent::Normal);
        prop_assert_eq!(timing.classify(timing.long_ms), PressEvent::Long);
        prop_assert_eq!(timing.classify(timing.very_long_ms), PressEvent::VeryLong);
        prop_assert_eq!(timing.classify(timing.normal_ms - 1), PressEvent::OnPressed);
    }

    #[test]
    fn single_press_reports_once_anywhere_on_the_clock(
        base in any::<u32>(),
        duration in 60u32..5000,
        gap in 0u32..300,
    ) {
        let mut machine = ButtonMachine::new(ButtonMode::Toggle);
        machine.set_toggle_timing(ToggleTiming {
            double_click_gap_ms: gap,
            ..ToggleTiming::default()
        });

        let events = press(&mut machine, base, duration, gap + 2);
        let expected = ToggleTiming::default().classify(duration);
        prop_assert_eq!(events, vec![expected]);
    }

    #[test]
    fn hold_repeats_match_cadence(
        base in any::<u32>(),
        held in 60u32..3000,
        delay in 60u32..1000,
        interval in 1u32..400,
    ) {
        let mut machine = ButtonMachine::new(ButtonMode::Hold);
        machine.set_hold_timing(periph_core::config::HoldTiming {
            repeat_delay_ms: delay,
            repeat_interval_ms: interval,
        });

        let events = press(&mut machine, base, held, 10);
        prop_assert_eq!(events[0], PressEvent::RepeatOnce);

        let repeats = events.iter().filter(|e| **e == PressEvent::Repeat).count() as u32;
        let expected = if held > delay { (held - 1 - delay) / interval + 1 } else { 0 };
        prop_assert_eq!(repeats, expected);
    }
}
