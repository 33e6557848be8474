//! Time traits
//!
//! The core never reads wall-clock time; it only needs a monotonic
//! second counter for deadlines/elapsed-time math and a blocking
//! millisecond delay for settle times and step pacing.

/// Monotonic clock with one-second resolution
pub trait Clock {
    /// Seconds since an arbitrary fixed origin (process start is fine)
    fn now_secs(&self) -> u64;
}

/// Blocking delay
///
/// All "suspension" in the core is deliberate blocking delay; there is
/// no scheduler. Implementations busy-wait or sleep as appropriate.
pub trait Delay {
    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}
