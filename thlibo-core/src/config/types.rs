//! Configuration type definitions
//!
//! All timing constants and thresholds observed to vary across hardware
//! revisions live here as named, tunable parameters. Defaults are the
//! values calibrated for the reference machine (2 ms step hold, 30 s
//! homing deadline, 5-crush iteration cap, 420/2400/140 pressure curve).

use crate::motion::pattern::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stepper drive parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepperConfig {
    /// Hold time per coil table entry, in milliseconds
    ///
    /// 1 is enough for reliable torque; 2 gives deliberate slow motion.
    pub step_delay_ms: u32,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self { step_delay_ms: 2 }
    }
}

/// Homing search parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HomingConfig {
    /// Search deadline in seconds
    pub timeout_secs: u32,
    /// Steps per seek burst between sensor polls
    pub seek_steps: u16,
    /// Search direction
    pub direction: Direction,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            seek_steps: 2,
            direction: Direction::Backward,
        }
    }
}

/// Glance sample offsets, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProbeConfig {
    /// Backward offset for the second sample
    pub back_degrees: u16,
    /// Forward travel for the third sample (net past the start)
    pub forward_degrees: u16,
    /// Partial return after the third sample
    pub return_degrees: u16,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            back_degrees: 5,
            forward_degrees: 10,
            return_degrees: 5,
        }
    }
}

/// Crush actuation timing ladder, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CrushTiming {
    /// Settle after switching the compressor off, before extending
    pub vent_ms: u32,
    /// Crusher extended dwell
    pub dwell_ms: u32,
    /// Settle after retracting
    pub retract_ms: u32,
    /// Settle after switching the compressor back on
    pub repressure_ms: u32,
}

impl Default for CrushTiming {
    fn default() -> Self {
        Self {
            vent_ms: 500,
            dwell_ms: 1500,
            retract_ms: 500,
            repressure_ms: 2000,
        }
    }
}

/// Cycle controller parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CycleConfig {
    /// Load/crush iterations allowed per cycle invocation
    ///
    /// Bounds worst-case cycle duration and protects against a payload
    /// sensor fault that reads "present" forever.
    pub max_iterations: u8,
    /// Rotation presenting the probed object to the crusher (one
    /// paddle-wheel slot)
    pub load_degrees: u16,
    /// Retreat issued when a safety abort interrupts motion
    pub retreat_steps: u16,
    /// Pacing of the pressurize countdown display
    pub countdown_tick_ms: u32,
    /// Standalone compressor run length in seconds
    pub compressor_run_secs: u32,
    /// Crush actuation timings
    pub crush: CrushTiming,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            load_degrees: 90,
            retreat_steps: 2,
            countdown_tick_ms: 800,
            compressor_run_secs: 1800,
            crush: CrushTiming::default(),
        }
    }
}

/// Pressure pre-charge curve
///
/// Observed values for these vary wildly between hardware revisions
/// (thresholds 420..144000 s, divisors 80..3600), so none of them are
/// hard-coded anywhere outside this struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PressureConfig {
    /// Idle time at or below which the tank is assumed still charged
    pub low_threshold_secs: u64,
    /// Idle time at or above which the tank is assumed empty
    pub high_threshold_secs: u64,
    /// Divisor for the interpolated band
    pub divisor_secs: u64,
    /// Pre-charge floor, seconds
    pub min_secs: u32,
    /// Pre-charge ceiling, seconds; also the cold-boot default
    pub max_secs: u32,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            low_threshold_secs: 420,
            high_threshold_secs: 2400,
            divisor_secs: 140,
            min_secs: 5,
            max_secs: 17,
        }
    }
}

/// Operator display behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiConfig {
    /// Idle time after which the status line flips from "Red to start"
    /// to "Green to start" (tank bled off, full pre-charge expected)
    pub idle_status_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            idle_status_secs: 900,
        }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    /// Format version for the persisted record
    pub version: u8,
    /// Stepper drive parameters
    pub stepper: StepperConfig,
    /// Homing search parameters
    pub homing: HomingConfig,
    /// Glance sample offsets
    pub probe: ProbeConfig,
    /// Cycle controller parameters
    pub cycle: CycleConfig,
    /// Pressure pre-charge curve
    pub pressure: PressureConfig,
    /// Operator display behavior
    pub ui: UiConfig,
}

impl MachineConfig {
    /// Current persisted format version
    pub const VERSION: u8 = 1;

    /// Build the compiled-in default configuration at the current version
    pub fn current() -> Self {
        Self {
            version: Self::VERSION,
            ..Self::default()
        }
    }

    /// Check the record version after deserialization
    pub fn is_valid(&self) -> bool {
        self.version == Self::VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_machine() {
        let config = MachineConfig::current();
        assert!(config.is_valid());
        assert_eq!(config.cycle.max_iterations, 5);
        assert_eq!(config.homing.timeout_secs, 30);
        assert_eq!(config.pressure.low_threshold_secs, 420);
        assert_eq!(config.pressure.high_threshold_secs, 2400);
        assert!(config.stepper.step_delay_ms >= 1);
    }

    #[test]
    fn test_version_mismatch_detected() {
        let config = MachineConfig {
            version: 0,
            ..MachineConfig::current()
        };
        assert!(!config.is_valid());
    }
}
