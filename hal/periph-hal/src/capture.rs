//! Timer input-capture abstractions
//!
//! An input-capture channel latches the free-running timer counter when an
//! edge is seen on its pin. Drivers alternate the active edge to measure
//! pulse widths.

/// Edge that triggers a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureEdge {
    /// Low-to-high transition
    Rising,
    /// High-to-low transition
    Falling,
}

/// Input-capture channel of a 16-bit timer
pub trait CaptureTimer {
    /// Counter value latched by the most recent capture
    fn captured(&self) -> u16;

    /// Select which edge triggers the next capture
    fn set_edge(&mut self, edge: CaptureEdge);

    /// Counter tick rate in Hz (timer clock divided by prescaler)
    fn tick_hz(&self) -> u32;
}
