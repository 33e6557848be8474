//! Pressure pre-charge scheduling
//!
//! The compressor tank bleeds off while the machine sits idle; longer
//! idle periods need a longer pre-charge before the first crush. The
//! mapping is a clamped curve: a floor below the low threshold (object
//! crushed recently, tank still holds), a ceiling above the high
//! threshold (assume fully depressurized), and a divisor in between.

use crate::config::PressureConfig;

/// Pre-charge duration scheduler
pub struct PressureScheduler {
    config: PressureConfig,
}

impl PressureScheduler {
    /// Create a scheduler over the given curve
    pub fn new(config: PressureConfig) -> Self {
        Self { config }
    }

    /// Pre-charge seconds for a given idle time
    ///
    /// The middle band is `round(elapsed / divisor)`, rounding half-up;
    /// it is intentionally not re-clamped to the floor (the reference
    /// machine returns 3 s just above the low threshold with the default
    /// curve, and that behavior is calibrated-in).
    pub fn precharge_secs(&self, elapsed_secs: u64) -> u32 {
        let c = &self.config;
        if elapsed_secs <= c.low_threshold_secs {
            c.min_secs
        } else if elapsed_secs >= c.high_threshold_secs {
            c.max_secs
        } else {
            ((elapsed_secs + c.divisor_secs / 2) / c.divisor_secs) as u32
        }
    }

    /// Pre-charge seconds given an optional last-run time
    ///
    /// A cold start (no recorded run) gets the full ceiling.
    pub fn precharge_after(&self, last_run_secs: Option<u64>, now_secs: u64) -> u32 {
        match last_run_secs {
            Some(t) => self.precharge_secs(now_secs.saturating_sub(t)),
            None => self.config.max_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> PressureScheduler {
        PressureScheduler::new(PressureConfig::default())
    }

    #[test]
    fn test_zero_elapsed_gets_minimum() {
        assert_eq!(scheduler().precharge_secs(0), 5);
    }

    #[test]
    fn test_long_idle_gets_maximum() {
        let high = PressureConfig::default().high_threshold_secs;
        assert_eq!(scheduler().precharge_secs(10 * high), 17);
        assert_eq!(scheduler().precharge_secs(high), 17);
    }

    #[test]
    fn test_midpoint_matches_closed_form() {
        let c = PressureConfig::default();
        let mid = (c.low_threshold_secs + c.high_threshold_secs) / 2; // 1410
        let expected = ((mid + c.divisor_secs / 2) / c.divisor_secs) as u32; // round(1410/140) = 10
        assert_eq!(scheduler().precharge_secs(mid), expected);
        assert_eq!(expected, 10);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let c = PressureConfig::default();
        assert_eq!(scheduler().precharge_secs(c.low_threshold_secs), c.min_secs);
        // Just above the low threshold the divisor takes over, un-clamped
        assert_eq!(scheduler().precharge_secs(c.low_threshold_secs + 1), 3);
    }

    #[test]
    fn test_cold_start_gets_ceiling() {
        assert_eq!(scheduler().precharge_after(None, 1_000_000), 17);
        assert_eq!(scheduler().precharge_after(Some(999_990), 1_000_000), 5);
    }
}
