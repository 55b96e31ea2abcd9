//! HC-SR04 echo pulse conversion
//!
//! The echo pin stays high for the round-trip time of the ping. At roughly
//! 343 m/s, each centimetre of distance adds 58 µs of echo.

/// Echo microseconds per centimetre of distance
pub const US_PER_CM: u64 = 58;

/// Width in counter ticks between a rising and a falling capture
///
/// Captures come from a free-running 16-bit counter, so a falling value
/// below the rising one means the counter wrapped once in between.
pub fn echo_ticks(rising: u16, falling: u16) -> u32 {
    if falling >= rising {
        u32::from(falling - rising)
    } else {
        0xFFFF - u32::from(rising) + u32::from(falling)
    }
}

/// Distance in millimetres for an echo of `ticks` at `tick_hz`
///
/// Returns `None` when the tick rate is zero.
pub fn echo_to_distance_mm(ticks: u32, tick_hz: u32) -> Option<u32> {
    let us = (u64::from(ticks) * 1_000_000).checked_div(u64::from(tick_hz))?;
    Some((us * 10 / US_PER_CM) as u32)
}
