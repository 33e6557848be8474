//! Object presence probe ("glance")
//!
//! The payload break beam is a single fixed-position sensor, but a can
//! resting in the paddle wheel may occlude it only at certain rotational
//! offsets. The glance routine samples at up to three shaft angles to
//! resolve that ambiguity and reports a classification, not a boolean,
//! because "present but needs repositioning" and "present and aligned"
//! are handled differently downstream.

use crate::config::ProbeConfig;
use crate::traits::{CancelToken, Delay, DigitalSensor, PhaseOutputs};

use super::pattern::Direction;
use super::sequencer::{StepOutcome, StepSequencer};

/// Object presence classification
///
/// The discriminants are the classification codes reported over defmt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Presence {
    /// No object at any sampled angle
    Absent = 0,
    /// Object occludes the beam at the home angle
    AtHome = 1,
    /// Object found at the backward offset; the caller restores the angle
    OffsetBack = 2,
    /// Object found at the forward offset; shaft already restored
    OffsetForward = 3,
}

impl Presence {
    /// Classification code (0..=3)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Check if an object was found at any angle
    pub fn is_present(self) -> bool {
        !matches!(self, Presence::Absent)
    }

    /// Check if the caller must restore the shaft angle before loading
    pub fn needs_restore(self) -> bool {
        matches!(self, Presence::OffsetBack)
    }
}

/// Marker for a glance aborted by cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interrupted;

/// Multi-angle object probe
pub struct ObjectProbe {
    config: ProbeConfig,
}

impl ObjectProbe {
    /// Create a probe with the given sample offsets
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Sample the payload sensor at up to three shaft angles
    ///
    /// The decision tree is fixed:
    /// 1. at the current (home) angle - asserted means [`Presence::AtHome`],
    ///    with no step commands issued;
    /// 2. backward by `back_degrees` - asserted means [`Presence::OffsetBack`];
    /// 3. forward by `forward_degrees` (net past the start) - asserted means
    ///    step back `return_degrees` and report [`Presence::OffsetForward`];
    /// 4. otherwise step back `return_degrees` and report [`Presence::Absent`].
    ///
    /// The probe returns the shaft to within one homing operation of its
    /// starting angle; callers re-home afterwards rather than trusting
    /// the open-loop return.
    pub fn glance<P: PhaseOutputs, D: Delay>(
        &self,
        sequencer: &mut StepSequencer<P, D>,
        payload: &mut impl DigitalSensor,
        cancel: &impl CancelToken,
    ) -> Result<Presence, Interrupted> {
        if payload.is_active() {
            return Ok(Presence::AtHome);
        }

        self.turn(sequencer, -(self.config.back_degrees as i32), cancel)?;
        if payload.is_active() {
            return Ok(Presence::OffsetBack);
        }

        self.turn(sequencer, self.config.forward_degrees as i32, cancel)?;
        if payload.is_active() {
            self.turn(sequencer, -(self.config.return_degrees as i32), cancel)?;
            return Ok(Presence::OffsetForward);
        }

        self.turn(sequencer, -(self.config.return_degrees as i32), cancel)?;
        Ok(Presence::Absent)
    }

    fn turn<P: PhaseOutputs, D: Delay>(
        &self,
        sequencer: &mut StepSequencer<P, D>,
        degrees: i32,
        cancel: &impl CancelToken,
    ) -> Result<(), Interrupted> {
        match sequencer.angle(degrees, Direction::Forward, cancel) {
            StepOutcome::Completed => Ok(()),
            StepOutcome::Cancelled => Err(Interrupted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CancelAfter, NoopDelay, RecordingCoils, ScriptedSensor};
    use crate::traits::NeverCancel;

    fn sequencer() -> StepSequencer<RecordingCoils, NoopDelay> {
        StepSequencer::new(RecordingCoils::new(), NoopDelay, 1)
    }

    fn probe() -> ObjectProbe {
        ObjectProbe::new(ProbeConfig::default())
    }

    #[test]
    fn test_present_at_home_issues_no_steps() {
        let mut seq = sequencer();
        seq.outputs_mut().writes.clear();
        let mut payload = ScriptedSensor::always(true);

        let presence = probe().glance(&mut seq, &mut payload, &NeverCancel);

        assert_eq!(presence, Ok(Presence::AtHome));
        assert!(seq.outputs().writes.is_empty());
        assert_eq!(seq.net_steps(), 0);
    }

    #[test]
    fn test_offset_back_leaves_shaft_displaced() {
        let mut seq = sequencer();
        let mut payload = ScriptedSensor::script(&[false, true]);

        let presence = probe().glance(&mut seq, &mut payload, &NeverCancel);

        assert_eq!(presence, Ok(Presence::OffsetBack));
        // 5 degrees backward at 509 steps/rev truncates to 7 steps
        assert_eq!(seq.net_steps(), -7);
        assert!(presence.unwrap().needs_restore());
    }

    #[test]
    fn test_offset_forward_returns_partway() {
        let mut seq = sequencer();
        let mut payload = ScriptedSensor::script(&[false, false, true]);

        let presence = probe().glance(&mut seq, &mut payload, &NeverCancel);

        assert_eq!(presence, Ok(Presence::OffsetForward));
        // -7 +14 -7: back at the starting angle
        assert_eq!(seq.net_steps(), 0);
    }

    #[test]
    fn test_absent_restores_starting_angle() {
        let mut seq = sequencer();
        let mut payload = ScriptedSensor::always(false);

        let presence = probe().glance(&mut seq, &mut payload, &NeverCancel);

        assert_eq!(presence, Ok(Presence::Absent));
        assert_eq!(seq.net_steps(), 0);
        assert_eq!(*seq.outputs().writes.last().unwrap(), [false; 4]);
        assert!(!presence.unwrap().is_present());
    }

    #[test]
    fn test_cancellation_aborts_with_coils_released() {
        let mut seq = sequencer();
        let mut payload = ScriptedSensor::always(false);
        let cancel = CancelAfter::new(3);

        let presence = probe().glance(&mut seq, &mut payload, &cancel);

        assert_eq!(presence, Err(Interrupted));
        assert_eq!(*seq.outputs().writes.last().unwrap(), [false; 4]);
    }

    #[test]
    fn test_classification_codes() {
        assert_eq!(Presence::Absent.code(), 0);
        assert_eq!(Presence::AtHome.code(), 1);
        assert_eq!(Presence::OffsetBack.code(), 2);
        assert_eq!(Presence::OffsetForward.code(), 3);
    }
}
