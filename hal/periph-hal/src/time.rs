//! Millisecond tick source
//!
//! Drivers only ever compare tick *differences*, computed with wrapping
//! subtraction, so a counter that wraps is handled transparently as long as
//! every measured interval is shorter than the wrap period (about 49.7 days
//! for the 32-bit counter used here).

/// Milliseconds since an arbitrary epoch, wrapping at `u32::MAX`
pub type Millis = u32;

/// Monotonic millisecond clock
///
/// Implementations typically wrap a SysTick counter or an embassy
/// `Instant`. The value must never move backwards except by wrapping.
pub trait Clock {
    /// Current tick in milliseconds
    fn now_ms(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `since` to `now`, tolerant of counter wraparound
#[inline]
pub fn elapsed_ms(now: Millis, since: Millis) -> u32 {
    now.wrapping_sub(since)
}
