//! DHT22 (AM2302) frame decoding
//!
//! The sensor answers a start pulse with 40 bits:
//!
//! ```text
//! byte 0..1  humidity, 0.1 %RH, big-endian
//! byte 2..3  temperature, 0.1 °C, bit 15 = sign (magnitude, not two's complement)
//! byte 4     checksum = low byte of the sum of bytes 0..3
//! ```

use super::SensorError;

/// Minimum time between two reads of the same sensor
pub const DHT22_MIN_INTERVAL_MS: u32 = 2000;

/// Raw 5-byte frame as shifted out by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dht22Frame(pub [u8; 5]);

/// Decoded measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dht22Reading {
    /// Relative humidity (%RH × 10)
    pub humidity_x10: u16,
    /// Temperature (°C × 10)
    pub temperature_x10: i16,
}

impl Dht22Frame {
    /// Check the trailing checksum byte
    pub fn checksum_ok(&self) -> bool {
        let [b0, b1, b2, b3, sum] = self.0;
        b0.wrapping_add(b1).wrapping_add(b2).wrapping_add(b3) == sum
    }

    /// Decode the frame, verifying its checksum first
    pub fn decode(&self) -> Result<Dht22Reading, SensorError> {
        if !self.checksum_ok() {
            return Err(SensorError::Checksum);
        }

        let [b0, b1, b2, b3, _] = self.0;
        let humidity_x10 = u16::from_be_bytes([b0, b1]);
        let magnitude = u16::from_be_bytes([b2 & 0x7F, b3]) as i16;
        let temperature_x10 = if b2 & 0x80 != 0 { -magnitude } else { magnitude };

        Ok(Dht22Reading {
            humidity_x10,
            temperature_x10,
        })
    }
}

impl Dht22Reading {
    /// Temperature in whole degrees Celsius (truncated toward zero)
    pub fn celsius(&self) -> i16 {
        self.temperature_x10 / 10
    }

    /// Relative humidity in whole percent (truncated)
    pub fn humidity_percent(&self) -> u16 {
        self.humidity_x10 / 10
    }
}
