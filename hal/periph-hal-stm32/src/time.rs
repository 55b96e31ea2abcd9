//! Millisecond tick from the embassy time driver

use embassy_time::Instant;
use periph_hal::{Clock, Millis};

/// [`Clock`] backed by `embassy_time::Instant`
///
/// The 64-bit uptime is truncated to [`Millis`], which wraps after about
/// 49.7 days; consumers compare ticks with wrapping subtraction.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> Millis {
        Instant::now().as_millis() as Millis
    }
}
