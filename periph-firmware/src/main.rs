//! Periph Button Demo Firmware
//!
//! Two buttons on a blue pill (STM32F103C8):
//!
//! - PA0, toggle mode: click flips the LED, double click turns it on,
//!   long press turns it off
//! - PA1, hold mode: holding it steps a counter up at the repeat rate
//!
//! Both buttons pull up internally and short to ground when pressed.
//!
//! An HC-SR04 on PB0 (TRIG) and PA6 (ECHO, TIM3 CH1) is pinged every
//! 200 ms and the distance logged.

#![no_std]
#![no_main]

use core::cell::{Cell, RefCell};

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::time::khz;
use embassy_stm32::timer::input_capture::{CapturePin, InputCapture};
use embassy_stm32::timer::{self, Channel, GeneralInstance4Channel};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::{with_timeout, Delay, Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use periph_core::button::{ButtonMode, PressEvent};
use periph_core::config::ButtonConfig;
use periph_drivers::button::{ButtonId, ButtonManager};
use periph_drivers::sensor::HcSr04;
use periph_hal::{ActiveLevel, OutputPin};
use periph_hal_stm32::{EmbassyClock, Stm32Capture, Stm32Input, Stm32Output};

bind_interrupts!(struct Irqs {
    TIM3 => timer::CaptureCompareInterruptHandler<peripherals::TIM3>;
});

/// Button poll period
const POLL_MS: u64 = 1;

/// Double-click window for the select button
const SELECT_DOUBLE_CLICK_MS: u32 = 250;

/// Hold-to-repeat timing for the adjust button
const ADJUST_REPEAT_DELAY_MS: u32 = 400;
const ADJUST_REPEAT_INTERVAL_MS: u32 = 100;

/// Polls between two pings
const SONAR_EVERY_POLLS: u32 = 200;

/// Longest wait for an echo edge (about 5 m round trip)
const ECHO_TIMEOUT_MS: u64 = 30;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Periph button demo starting...");

    let p = embassy_stm32::init(Default::default());

    // On-board LED on PC13, active low
    let led = RefCell::new(Stm32Output::new(Output::new(p.PC13, Level::High, Speed::Low)));
    let counter = Cell::new(0u32);

    let select = Stm32Input::new(Input::new(p.PA0, Pull::Up));
    let adjust = Stm32Input::new(Input::new(p.PA1, Pull::Up));

    let on_select = |id: ButtonId, event: PressEvent| {
        debug!("select {}: {:?}", id.raw(), event);
        let mut led = led.borrow_mut();
        match event {
            PressEvent::OnPressed | PressEvent::Normal => led.toggle(),
            PressEvent::Double => led.set_low(),
            PressEvent::Long => led.set_high(),
            PressEvent::VeryLong => {
                counter.set(0);
                info!("counter reset");
            }
            _ => {}
        }
    };

    let on_adjust = |_id: ButtonId, event: PressEvent| {
        if event == PressEvent::Repeat {
            counter.set(counter.get().wrapping_add(1));
            info!("counter = {}", counter.get());
        }
    };

    let mut buttons: ButtonManager<_> = ButtonManager::new(EmbassyClock);

    let mut select_config = ButtonConfig::toggle(ActiveLevel::Low);
    select_config.timing.toggle.double_click_gap_ms = SELECT_DOUBLE_CLICK_MS;
    let select_id = unwrap!(buttons.register_with_config(&select, &select_config, Some(&on_select)));

    let adjust_id =
        unwrap!(buttons.register(&adjust, ActiveLevel::Low, ButtonMode::Hold, Some(&on_adjust)));
    buttons.set_hold_timing(adjust_id, ADJUST_REPEAT_DELAY_MS, ADJUST_REPEAT_INTERVAL_MS);

    info!(
        "{} buttons registered (select={}, adjust={})",
        buttons.len(),
        select_id.raw(),
        adjust_id.raw()
    );

    // 1 MHz capture clock: one tick per microsecond of echo
    let echo = CapturePin::new(p.PA6, Pull::None);
    let capture = InputCapture::new(
        p.TIM3,
        Some(echo),
        None,
        None,
        None,
        Irqs,
        khz(1000),
        Default::default(),
    );
    let trig = Stm32Output::new(Output::new(p.PB0, Level::Low, Speed::Low));
    let mut sonar = HcSr04::new(Stm32Capture::new(capture, Channel::Ch1, khz(1000)), trig);

    let mut ticker = Ticker::every(Duration::from_millis(POLL_MS));
    let mut polls: u32 = 0;
    loop {
        buttons.update();

        polls = polls.wrapping_add(1);
        if polls % SONAR_EVERY_POLLS == 0 {
            ping(&mut sonar).await;
        }

        ticker.next().await;
    }
}

/// Trigger one ping and log the distance
///
/// Button timing is timestamp based, so the few milliseconds spent here
/// only coarsen the next update.
async fn ping<T: GeneralInstance4Channel>(sonar: &mut HcSr04<Stm32Capture<'_, T>, Stm32Output<'_>>) {
    sonar.trigger(&mut Delay);

    // Rising then falling edge of the echo
    for _ in 0..2 {
        let edge = with_timeout(Duration::from_millis(ECHO_TIMEOUT_MS), sonar.capture_mut().wait_edge());
        if edge.await.is_err() {
            warn!("no echo");
            return;
        }
        sonar.on_capture();
    }

    match sonar.distance_cm() {
        Ok(cm) => info!("distance {} cm", cm),
        Err(e) => warn!("sonar read failed: {:?}", e),
    }
}
