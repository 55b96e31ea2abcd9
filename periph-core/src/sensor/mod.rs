//! Sensor data decoding
//!
//! Pure conversions from raw sensor output to engineering units. The
//! hardware side (bus timing, captures) lives in `periph-drivers`.

pub mod dht22;
pub mod ultrasonic;

pub use dht22::{Dht22Frame, Dht22Reading};
pub use ultrasonic::{echo_ticks, echo_to_distance_mm};

/// Errors that can occur while reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not respond within the expected time
    Timeout,
    /// Frame failed its checksum
    Checksum,
    /// Read requested before the sensor's minimum interval elapsed
    Interval,
    /// No complete measurement available yet
    NotReady,
}
