//! DHT22 humidity/temperature sensor
//!
//! The single-wire start pulse and bit sampling are done by the HAL behind
//! [`FrameSource`]; this driver rate-limits reads and validates the frame.

use periph_core::sensor::dht22::DHT22_MIN_INTERVAL_MS;
use periph_core::sensor::{Dht22Frame, Dht22Reading, SensorError};
use periph_core::warn;
use periph_hal::{elapsed_ms, Clock, Millis};

/// Source of raw DHT22 frames
pub trait FrameSource {
    /// Bus-level failure (no response, line stuck)
    type Error;

    /// Send the start signal and shift in the sensor's 5-byte answer
    fn read_frame(&mut self) -> Result<[u8; 5], Self::Error>;
}

/// DHT22 sensor on one data line
pub struct Dht22<B, C> {
    bus: B,
    clock: C,
    last_read: Option<Millis>,
}

impl<B: FrameSource, C: Clock> Dht22<B, C> {
    /// Create a driver; the first read is allowed immediately
    pub fn new(bus: B, clock: C) -> Self {
        Self {
            bus,
            clock,
            last_read: None,
        }
    }

    /// Read humidity and temperature
    ///
    /// Fails with [`SensorError::Interval`] if called within 2 s of the
    /// previous attempt. A failed attempt still counts, since the sensor
    /// was woken either way.
    pub fn read(&mut self) -> Result<Dht22Reading, SensorError> {
        let now = self.clock.now_ms();
        if let Some(last) = self.last_read {
            if elapsed_ms(now, last) < DHT22_MIN_INTERVAL_MS {
                return Err(SensorError::Interval);
            }
        }
        self.last_read = Some(now);

        let raw = self.bus.read_frame().map_err(|_| {
            warn!("DHT22 did not answer");
            SensorError::Timeout
        })?;

        let frame = Dht22Frame(raw);
        frame.decode().map_err(|err| {
            warn!("DHT22 frame rejected: {:?}", frame);
            err
        })
    }

    /// Release the bus and clock
    pub fn release(self) -> (B, C) {
        (self.bus, self.clock)
    }
}
