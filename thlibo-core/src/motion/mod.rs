//! Loader motion: step sequencing, homing, object probing
//!
//! Everything here is open-loop. The only position feedback in the
//! machine is the home break beam; step counts are never trusted for
//! safety-critical decisions.

pub mod homing;
pub mod pattern;
pub mod probe;
pub mod sequencer;

pub use homing::{HomingController, HomingOutcome};
pub use pattern::{Direction, FULL_ROTATION, HALF_STEP};
pub use probe::{Interrupted, ObjectProbe, Presence};
pub use sequencer::{StepOutcome, StepSequencer};
