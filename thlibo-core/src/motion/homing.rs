//! Bounded homing search
//!
//! Drives the shaft toward the home break beam in small increments until
//! the beam asserts or a deadline passes. Reports the result instead of
//! assuming success; the caller decides whether to retry.

use crate::config::HomingConfig;
use crate::traits::{CancelToken, Clock, Delay, DigitalSensor, PhaseOutputs};

use super::sequencer::{StepOutcome, StepSequencer};

/// Terminal result of one homing attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingOutcome {
    /// Home sensor asserted; shaft is at the reference angle
    Homed,
    /// Deadline passed without the sensor asserting
    TimedOut,
    /// Operator interrupt; no retry
    Cancelled,
}

impl HomingOutcome {
    /// Check if the shaft reached home
    pub fn is_homed(self) -> bool {
        matches!(self, HomingOutcome::Homed)
    }
}

/// Homing controller
///
/// Stateless between invocations; all tunables live in [`HomingConfig`].
pub struct HomingController {
    config: HomingConfig,
}

impl HomingController {
    /// Create a controller with the given tunables
    pub fn new(config: HomingConfig) -> Self {
        Self { config }
    }

    /// Run one bounded homing attempt
    ///
    /// Exit conditions are checked in order every iteration: sensor
    /// asserted, deadline passed, cancellation requested. On every exit
    /// path the coils are left de-energized.
    pub fn run<P: PhaseOutputs, D: Delay>(
        &self,
        sequencer: &mut StepSequencer<P, D>,
        home: &mut impl DigitalSensor,
        clock: &impl Clock,
        cancel: &impl CancelToken,
    ) -> HomingOutcome {
        let deadline = clock.now_secs() + self.config.timeout_secs as u64;

        let outcome = loop {
            if home.is_active() {
                sequencer.mark_home();
                break HomingOutcome::Homed;
            }
            if clock.now_secs() >= deadline {
                break HomingOutcome::TimedOut;
            }
            if cancel.is_cancelled() {
                break HomingOutcome::Cancelled;
            }
            let seek = self.config.seek_steps as i32;
            if sequencer.step(seek, self.config.direction, cancel) == StepOutcome::Cancelled {
                break HomingOutcome::Cancelled;
            }
        };

        // The sequencer releases after every step call; repeat it here so
        // the invariant holds even on the zero-step exit paths.
        sequencer.release();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Direction;
    use crate::testing::{NoopDelay, RecordingCoils, ScriptedSensor, TickingClock};
    use crate::traits::NeverCancel;

    fn sequencer() -> StepSequencer<RecordingCoils, NoopDelay> {
        StepSequencer::new(RecordingCoils::new(), NoopDelay, 1)
    }

    fn controller() -> HomingController {
        HomingController::new(HomingConfig::default())
    }

    #[test]
    fn test_already_home_returns_without_stepping() {
        let mut seq = sequencer();
        seq.outputs_mut().writes.clear();
        let mut home = ScriptedSensor::always(true);
        let clock = TickingClock::new(1);

        let outcome = controller().run(&mut seq, &mut home, &clock, &NeverCancel);

        assert_eq!(outcome, HomingOutcome::Homed);
        // Only the explicit release; no energized writes at all
        assert!(seq.outputs().writes.iter().all(|w| *w == [false; 4]));
    }

    #[test]
    fn test_times_out_within_one_poll_of_deadline() {
        let mut seq = sequencer();
        let mut home = ScriptedSensor::always(false);
        let clock = TickingClock::new(1);

        let outcome = controller().run(&mut seq, &mut home, &clock, &NeverCancel);

        assert_eq!(outcome, HomingOutcome::TimedOut);
        // One clock query per iteration plus the deadline capture, so the
        // search may overshoot the deadline by at most one poll.
        let timeout = HomingConfig::default().timeout_secs as u64;
        assert!(clock.queries() <= timeout + 2);
        assert_eq!(*seq.outputs().writes.last().unwrap(), [false; 4]);
    }

    #[test]
    fn test_seeks_backward_until_sensor_asserts() {
        let mut seq = sequencer();
        // Asserts on the fourth sample
        let mut home = ScriptedSensor::script(&[false, false, false, true]);
        let clock = TickingClock::new(0);

        let outcome = controller().run(&mut seq, &mut home, &clock, &NeverCancel);

        assert_eq!(outcome, HomingOutcome::Homed);
        assert_eq!(seq.net_steps(), 0, "mark_home resets the counter");
        // Three seek bursts of two steps each, all backward
        assert_eq!(seq.outputs().writes.iter().filter(|w| **w != [false; 4]).count(), 3 * 2 * 8);
    }

    #[test]
    fn test_cancellation_exits_immediately_deenergized() {
        let mut seq = sequencer();
        let mut home = ScriptedSensor::always(false);
        let clock = TickingClock::new(0);
        let cancel = crate::testing::CancelAfter::new(0);

        let outcome = controller().run(&mut seq, &mut home, &clock, &cancel);

        assert_eq!(outcome, HomingOutcome::Cancelled);
        assert_eq!(*seq.outputs().writes.last().unwrap(), [false; 4]);
    }

    #[test]
    fn test_default_direction_is_backward() {
        assert_eq!(HomingConfig::default().direction, Direction::Backward);
    }
}
