//! Open-loop step sequencer for the geared loader stepper
//!
//! The sequencer owns the four phase outputs and the inter-step delay.
//! It has no feedback sensor and therefore no failure modes of its own;
//! its one hard guarantee is that the coils are de-energized on every
//! exit path. The gearing means the shaft cannot be back-driven, so
//! holding torque buys nothing and continuous energization only heats
//! the driver board.

use crate::traits::{CancelToken, Delay, PhaseOutputs};

use super::pattern::{next_phase, steps_for_angle, Direction, HALF_STEP, PHASE_COUNT};

/// Result of a stepping operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// All requested steps were issued
    Completed,
    /// The cancel token asserted between steps
    Cancelled,
}

/// Step sequencer bound to four coil outputs and an inter-step delay
///
/// One *step* is a full sweep of the 8-entry half-step table, forward or
/// reversed. The sequencer tracks its phase index so consecutive motions
/// continue the electrical sequence coherently, and a signed net step
/// counter for diagnostics. The counter is advisory only; the home
/// sensor is the position ground truth.
pub struct StepSequencer<P: PhaseOutputs, D: Delay> {
    coils: P,
    delay: D,
    step_delay_ms: u32,
    phase: u8,
    net_steps: i32,
}

impl<P: PhaseOutputs, D: Delay> StepSequencer<P, D> {
    /// Create a sequencer and drive the coils to the de-energized state
    ///
    /// `step_delay_ms` is the hold time per table entry; 1 ms is enough
    /// for reliable torque, higher values give deliberately slow motion.
    pub fn new(coils: P, delay: D, step_delay_ms: u32) -> Self {
        let mut seq = Self {
            coils,
            delay,
            step_delay_ms,
            phase: 0,
            net_steps: 0,
        };
        seq.release();
        seq
    }

    /// Issue `count` steps in `direction`
    ///
    /// A negative `count` flips the direction and negates, so
    /// `step(-2, Forward)` equals `step(2, Backward)`. The cancel token
    /// is polled at the top of every step; a cancelled run stops between
    /// table sweeps. The coils are de-energized on both exit paths.
    pub fn step(
        &mut self,
        count: i32,
        direction: Direction,
        cancel: &impl CancelToken,
    ) -> StepOutcome {
        let steps = count.unsigned_abs();
        let direction = if count < 0 {
            direction.opposite()
        } else {
            direction
        };

        let mut outcome = StepOutcome::Completed;
        for _ in 0..steps {
            if cancel.is_cancelled() {
                outcome = StepOutcome::Cancelled;
                break;
            }
            self.sweep(direction);
        }
        // Every exit funnels through here, cancelled or not.
        self.release();
        outcome
    }

    /// Rotate by an angle in degrees, truncating to whole steps
    pub fn angle(
        &mut self,
        degrees: i32,
        direction: Direction,
        cancel: &impl CancelToken,
    ) -> StepOutcome {
        let steps = steps_for_angle(degrees.unsigned_abs()) as i32;
        let steps = if degrees < 0 { -steps } else { steps };
        self.step(steps, direction, cancel)
    }

    /// Drive all four phases low
    ///
    /// Idempotent; safe to call at any time.
    pub fn release(&mut self) {
        self.coils.set_phases([false; 4]);
    }

    /// Current index into the half-step table
    pub fn phase_index(&self) -> u8 {
        self.phase
    }

    /// Signed steps issued since the last [`mark_home`](Self::mark_home)
    ///
    /// Diagnostic only; never used for safety decisions.
    pub fn net_steps(&self) -> i32 {
        self.net_steps
    }

    /// Reset the net step counter at a known reference angle
    pub fn mark_home(&mut self) {
        self.net_steps = 0;
    }

    /// Test-only view of the phase outputs
    #[cfg(test)]
    pub(crate) fn outputs(&self) -> &P {
        &self.coils
    }

    /// Test-only mutable view of the phase outputs
    #[cfg(test)]
    pub(crate) fn outputs_mut(&mut self) -> &mut P {
        &mut self.coils
    }

    fn sweep(&mut self, direction: Direction) {
        for _ in 0..PHASE_COUNT {
            self.phase = next_phase(self.phase, direction);
            self.coils.set_phases(HALF_STEP[self.phase as usize]);
            self.delay.delay_ms(self.step_delay_ms);
        }
        self.net_steps += match direction {
            Direction::Forward => 1,
            Direction::Backward => -1,
        };
    }
}
