//! Machine hardware bundle
//!
//! The rig owns every actuation seam the cycle controller touches. There
//! is exactly one of it per process, and whichever routine holds it has
//! exclusive use of the physical actuator - ownership transfers by
//! call/return, never by background task.

use crate::motion::StepSequencer;
use crate::safety::Interlock;
use crate::traits::{Delay, DigitalSensor, PhaseOutputs, SwitchOutput};

/// The machine's owned hardware seams
pub struct Rig<P, D, H, L, S, C, K>
where
    P: PhaseOutputs,
    D: Delay,
    H: DigitalSensor,
    L: DigitalSensor,
    S: DigitalSensor,
    C: SwitchOutput,
    K: SwitchOutput,
{
    /// Loader stepper sequencer
    pub sequencer: StepSequencer<P, D>,
    /// Home-position break beam
    pub home: H,
    /// Payload-presence break beam
    pub payload: L,
    /// Case safety interlock
    pub interlock: Interlock<S>,
    /// Crusher valve
    pub crusher: C,
    /// Compressor relay
    pub compressor: K,
}

impl<P, D, H, L, S, C, K> Rig<P, D, H, L, S, C, K>
where
    P: PhaseOutputs,
    D: Delay,
    H: DigitalSensor,
    L: DigitalSensor,
    S: DigitalSensor,
    C: SwitchOutput,
    K: SwitchOutput,
{
    /// Assemble the rig and drive every output to its known-safe state
    pub fn new(
        sequencer: StepSequencer<P, D>,
        home: H,
        payload: L,
        interlock: Interlock<S>,
        crusher: C,
        compressor: K,
    ) -> Self {
        let mut rig = Self {
            sequencer,
            home,
            payload,
            interlock,
            crusher,
            compressor,
        };
        rig.make_safe();
        rig
    }

    /// Coils released, crusher retracted, compressor off
    pub fn make_safe(&mut self) {
        self.sequencer.release();
        self.crusher.set_on(false);
        self.compressor.set_on(false);
    }
}
