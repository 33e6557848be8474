//! Case safety interlock
//!
//! The interlock switch asserts when the enclosure is open (or the
//! rotator has jammed against it). Every actuation request re-checks it
//! immediately before moving hardware; a stale reading is never trusted.

use crate::traits::DigitalSensor;

/// Returned when the interlock reads open at an actuation checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafetyViolation;

/// Interlock gate over the case sensor
///
/// Tracks how many times an operation was refused, for diagnostics.
pub struct Interlock<S: DigitalSensor> {
    sensor: S,
    trips: u16,
}

impl<S: DigitalSensor> Interlock<S> {
    /// Wrap the case sensor
    pub fn new(sensor: S) -> Self {
        Self { sensor, trips: 0 }
    }

    /// Read the sensor now; active means the case is open
    pub fn case_open(&mut self) -> bool {
        self.sensor.is_active()
    }

    /// Gate an actuation: fresh sensor read, `Err` if the case is open
    pub fn ensure_safe(&mut self) -> Result<(), SafetyViolation> {
        if self.case_open() {
            self.trips = self.trips.saturating_add(1);
            Err(SafetyViolation)
        } else {
            Ok(())
        }
    }

    /// Number of refused actuations since startup
    pub fn trips(&self) -> u16 {
        self.trips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedSensor;

    #[test]
    fn test_closed_case_passes() {
        let mut interlock = Interlock::new(ScriptedSensor::always(false));
        assert_eq!(interlock.ensure_safe(), Ok(()));
        assert_eq!(interlock.trips(), 0);
    }

    #[test]
    fn test_open_case_trips() {
        let mut interlock = Interlock::new(ScriptedSensor::always(true));
        assert_eq!(interlock.ensure_safe(), Err(SafetyViolation));
        assert_eq!(interlock.ensure_safe(), Err(SafetyViolation));
        assert_eq!(interlock.trips(), 2);
    }

    #[test]
    fn test_rechecks_sensor_every_gate() {
        // Case closes between two checks; the second must pass
        let mut interlock = Interlock::new(ScriptedSensor::script(&[true, false]));
        assert!(interlock.ensure_safe().is_err());
        assert!(interlock.ensure_safe().is_ok());
        assert_eq!(interlock.trips(), 1);
    }
}
