//! Events that trigger state transitions

use super::machine::FaultKind;

/// Events that can trigger state transitions
///
/// Button events fire on the release edge, matching the reference
/// machine's two-read edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Boot sequence completed successfully
    BootComplete,

    // Operator button events
    /// Start button released: run a cycle
    StartReleased,
    /// Reset button released: pre-charge, then run a cycle
    ResetReleased,
    /// Compressor button released: standalone compressor run
    CompressorReleased,
    /// Stop control: abandon the current operation
    Stopped,

    // Sequence events
    /// Pre-charge countdown finished
    PressurizeComplete,
    /// Cycle controller returned
    CycleFinished,
    /// Standalone compressor run finished
    CompressorFinished,

    // Safety events
    /// Fault detected by the cycle controller or interlock
    FaultDetected(FaultKind),
    /// Fault display acknowledged/cleared
    FaultCleared,
}

impl Event {
    /// Check if this event came from an operator control
    pub fn is_operator_event(&self) -> bool {
        matches!(
            self,
            Event::StartReleased
                | Event::ResetReleased
                | Event::CompressorReleased
                | Event::Stopped
        )
    }

    /// Check if this event indicates a fault
    pub fn is_fault_event(&self) -> bool {
        matches!(self, Event::FaultDetected(_))
    }
}
