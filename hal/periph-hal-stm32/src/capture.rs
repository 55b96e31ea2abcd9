//! Input-capture adapter for embassy-stm32 timers
//!
//! embassy latches capture values through async edge waits rather than a
//! raw interrupt, so [`Stm32Capture::wait_edge`] stands in for the capture
//! interrupt: await it, then hand the event to the driver.
//!
//! ```ignore
//! loop {
//!     sonar.trigger(&mut Delay);
//!     sonar.capture_mut().wait_edge().await;
//!     sonar.on_capture();
//!     sonar.capture_mut().wait_edge().await;
//!     sonar.on_capture();
//!     if let Ok(cm) = sonar.distance_cm() { /* ... */ }
//! }
//! ```

use embassy_stm32::time::Hertz;
use embassy_stm32::timer::input_capture::InputCapture;
use embassy_stm32::timer::{Channel, GeneralInstance4Channel};
use periph_hal::{CaptureEdge, CaptureTimer};

/// One channel of an embassy input-capture timer
pub struct Stm32Capture<'d, T: GeneralInstance4Channel> {
    capture: InputCapture<'d, T>,
    channel: Channel,
    edge: CaptureEdge,
    captured: u16,
    tick_hz: u32,
}

impl<'d, T: GeneralInstance4Channel> Stm32Capture<'d, T> {
    /// Wrap a configured input-capture timer
    ///
    /// `counting_freq` must be the frequency the timer was created with;
    /// embassy derives the prescaler from it and the timer clock.
    pub fn new(capture: InputCapture<'d, T>, channel: Channel, counting_freq: Hertz) -> Self {
        Self {
            capture,
            channel,
            edge: CaptureEdge::Rising,
            captured: 0,
            tick_hz: counting_freq.0,
        }
    }

    /// Wait for the selected edge and latch the counter value
    pub async fn wait_edge(&mut self) {
        let value = match self.edge {
            CaptureEdge::Rising => self.capture.wait_for_rising_edge(self.channel).await,
            CaptureEdge::Falling => self.capture.wait_for_falling_edge(self.channel).await,
        };
        // 16-bit capture registers; wider timers are truncated to match
        self.captured = value as u16;
    }
}

impl<T: GeneralInstance4Channel> CaptureTimer for Stm32Capture<'_, T> {
    fn captured(&self) -> u16 {
        self.captured
    }

    fn set_edge(&mut self, edge: CaptureEdge) {
        self.edge = edge;
    }

    fn tick_hz(&self) -> u32 {
        self.tick_hz
    }
}
