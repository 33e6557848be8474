//! Per-run cycle context
//!
//! Replaces the original machine's module-level timestamp global with an
//! explicit context object owned by the caller. Persistence is a
//! boundary concern: the firmware loads the stored timestamp into the
//! context at boot and saves it back after cycles.

use crate::traits::Clock;

/// Mutable state shared across cycle invocations within one process run
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleContext {
    /// Monotonic time of the last completed run, if any
    pub last_run_secs: Option<u64>,
}

impl CycleContext {
    /// Fresh context with no recorded run
    pub fn new() -> Self {
        Self::default()
    }

    /// Context seeded from a persisted timestamp (already converted to
    /// the monotonic clock domain)
    pub fn with_last_run(last_run_secs: Option<u64>) -> Self {
        Self { last_run_secs }
    }

    /// Seconds since the last completed run, or `None` on a cold start
    pub fn elapsed(&self, clock: &impl Clock) -> Option<u64> {
        self.last_run_secs
            .map(|t| clock.now_secs().saturating_sub(t))
    }

    /// Record a completed run at the current time
    pub fn record_run(&mut self, clock: &impl Clock) {
        self.last_run_secs = Some(clock.now_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TickingClock;

    #[test]
    fn test_cold_start_has_no_elapsed() {
        let ctx = CycleContext::new();
        assert_eq!(ctx.elapsed(&TickingClock::new(0)), None);
    }

    #[test]
    fn test_elapsed_since_recorded_run() {
        let clock = TickingClock::at(100, 0);
        let mut ctx = CycleContext::new();
        ctx.record_run(&clock);
        let later = TickingClock::at(160, 0);
        assert_eq!(ctx.elapsed(&later), Some(60));
    }
}
