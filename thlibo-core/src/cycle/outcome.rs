//! Cycle terminal outcomes

/// Terminal outcome of one cycle controller invocation
///
/// Every variant leaves the actuator de-energized and the crusher
/// retracted before the controller returns; none of them crash the
/// process. The firmware maps each to a display message and a blink
/// pattern so an operator can tell "nothing to crush" from "jammed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Single-pass invocation found and crushed an object
    ObjectCrushed,
    /// The probe found nothing; the loop drained normally
    NoObjectFound,
    /// The load/crush loop hit the iteration cap; treated as a normal
    /// terminal state, not a fault
    IterationLimitExceeded,
    /// The case interlock opened; actuation aborted after a retreat step
    SafetyAborted,
    /// Homing never found the reference notch within its deadline
    HomingTimedOut,
    /// Operator interrupt
    Cancelled,
}

impl CycleOutcome {
    /// Outcomes that completed their work
    pub fn is_success(self) -> bool {
        matches!(self, CycleOutcome::ObjectCrushed | CycleOutcome::NoObjectFound)
    }

    /// Outcomes an operator should treat as a mechanism problem
    pub fn is_fault(self) -> bool {
        matches!(self, CycleOutcome::SafetyAborted | CycleOutcome::HomingTimedOut)
    }
}

/// Outcome plus bookkeeping for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Terminal outcome
    pub outcome: CycleOutcome,
    /// Objects crushed during this invocation
    pub crushed: u8,
}
