//! HC-SR04 ultrasonic rangefinder
//!
//! A pulse on TRIG starts a ping; ECHO then stays high for the round-trip
//! time. ECHO is wired to a timer input-capture channel and the driver
//! alternates the capture edge to latch both ends of the pulse.
//!
//! [`HcSr04::on_capture`] runs in the capture interrupt, so the application
//! shares the driver with its main loop through a critical-section mutex.

use embedded_hal::delay::DelayNs;
use periph_core::sensor::{echo_ticks, echo_to_distance_mm, SensorError};
use periph_core::{debug, warn};
use periph_hal::{CaptureEdge, CaptureTimer, OutputPin};

/// Trigger pulse width (datasheet minimum is 10 µs)
pub const TRIGGER_PULSE_US: u32 = 10;

/// HC-SR04 on one trigger pin and one capture channel
pub struct HcSr04<T, P> {
    timer: T,
    trig: P,
    rising: u16,
    falling: u16,
    /// Rising edge latched, waiting for the falling one
    awaiting_fall: bool,
    /// Both edges latched, measurement not yet consumed
    complete: bool,
}

impl<T: CaptureTimer, P: OutputPin> HcSr04<T, P> {
    /// Create a driver, arming the capture for a rising edge
    pub fn new(mut timer: T, mut trig: P) -> Self {
        timer.set_edge(CaptureEdge::Rising);
        trig.set_low();
        Self {
            timer,
            trig,
            rising: 0,
            falling: 0,
            awaiting_fall: false,
            complete: false,
        }
    }

    /// Start a ping
    ///
    /// Discards any unread measurement and re-arms the capture.
    pub fn trigger<D: DelayNs>(&mut self, delay: &mut D) {
        self.complete = false;
        self.awaiting_fall = false;
        self.timer.set_edge(CaptureEdge::Rising);

        self.trig.set_high();
        delay.delay_us(TRIGGER_PULSE_US);
        self.trig.set_low();
    }

    /// Handle one capture event
    pub fn on_capture(&mut self) {
        if self.complete {
            // Stray edge before the last measurement was read
            return;
        }

        if !self.awaiting_fall {
            self.rising = self.timer.captured();
            self.awaiting_fall = true;
            self.timer.set_edge(CaptureEdge::Falling);
        } else {
            self.falling = self.timer.captured();
            self.awaiting_fall = false;
            self.complete = true;
            self.timer.set_edge(CaptureEdge::Rising);
        }
    }

    /// Whether a complete measurement is waiting
    pub fn is_ready(&self) -> bool {
        self.complete
    }

    /// Consume the latest measurement, in millimetres
    ///
    /// Fails with [`SensorError::NotReady`] if no echo has completed since
    /// the last call, or if the capture timer is not counting.
    pub fn distance_mm(&mut self) -> Result<u32, SensorError> {
        if !self.complete {
            return Err(SensorError::NotReady);
        }
        self.complete = false;

        let ticks = echo_ticks(self.rising, self.falling);
        match echo_to_distance_mm(ticks, self.timer.tick_hz()) {
            Some(mm) => {
                debug!("echo {} ticks = {} mm", ticks, mm);
                Ok(mm)
            }
            None => {
                warn!("capture timer reports 0 Hz");
                Err(SensorError::NotReady)
            }
        }
    }

    /// Consume the latest measurement, in whole centimetres
    pub fn distance_cm(&mut self) -> Result<u32, SensorError> {
        self.distance_mm().map(|mm| mm / 10)
    }

    /// Capture channel, for HALs that latch edges outside the interrupt
    pub fn capture_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}
