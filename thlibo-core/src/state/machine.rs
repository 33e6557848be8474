//! State machine definition
//!
//! The operator surface is three buttons and a stop: start runs a cycle,
//! reset forces a pre-charge before the cycle, compressor runs the tank
//! pump on its own. All firmware behavior is a function of the current
//! state and an event.

use super::events::Event;

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on initialization: config load, known-safe outputs, POST
    Boot,
    /// Waiting for an operator button
    Idle,
    /// Compressor on, pre-charge countdown running
    Pressurizing,
    /// Load/crush cycle in progress
    Cycling,
    /// Standalone compressor run
    CompressorRun,
    /// Fault displayed; outputs disabled until cleared
    Fault(FaultKind),
}

/// Faults an operator must be able to distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Case interlock open (or the rotator jammed against it)
    CaseOpen,
    /// Home sensor never asserted within its deadline
    HomingTimeout,
}

impl State {
    /// Check if the machine is running something
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            State::Pressurizing | State::Cycling | State::CompressorRun
        )
    }

    /// Check if this is a fault state
    pub fn is_fault(&self) -> bool {
        matches!(self, State::Fault(_))
    }

    /// Check if this state allows starting an actuation
    pub fn actuation_allowed(&self) -> bool {
        !matches!(self, State::Boot | State::Fault(_))
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Boot transitions: the boot sequence pre-charges, then runs
            // the first homing pass as a cycle
            (Boot, BootComplete) => Pressurizing,
            (Boot, FaultDetected(kind)) => Fault(kind),

            // Idle transitions
            (Idle, StartReleased) => Cycling,
            (Idle, ResetReleased) => Pressurizing,
            (Idle, CompressorReleased) => CompressorRun,
            (Idle, FaultDetected(kind)) => Fault(kind),

            // Pressurizing transitions
            (Pressurizing, PressurizeComplete) => Cycling,
            (Pressurizing, Stopped) => Idle,
            (Pressurizing, FaultDetected(kind)) => Fault(kind),

            // Cycling transitions
            (Cycling, CycleFinished) => Idle,
            (Cycling, Stopped) => Idle,
            (Cycling, FaultDetected(kind)) => Fault(kind),

            // CompressorRun transitions
            (CompressorRun, CompressorFinished) => Idle,
            (CompressorRun, Stopped) => Idle,
            (CompressorRun, FaultDetected(kind)) => Fault(kind),

            // Fault transitions
            (Fault(_), FaultCleared) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_leads_to_initial_pressurize() {
        let state = State::Boot.transition(Event::BootComplete);
        assert_eq!(state, State::Pressurizing);
        let state = state.transition(Event::PressurizeComplete);
        assert_eq!(state, State::Cycling);
        let state = state.transition(Event::CycleFinished);
        assert_eq!(state, State::Idle);
    }

    #[test]
    fn test_start_runs_a_cycle() {
        let state = State::Idle.transition(Event::StartReleased);
        assert_eq!(state, State::Cycling);
        assert!(state.is_busy());
    }

    #[test]
    fn test_reset_pressurizes_before_cycling() {
        let state = State::Idle.transition(Event::ResetReleased);
        assert_eq!(state, State::Pressurizing);
        assert_eq!(
            state.transition(Event::PressurizeComplete),
            State::Cycling
        );
    }

    #[test]
    fn test_compressor_run_round_trip() {
        let state = State::Idle.transition(Event::CompressorReleased);
        assert_eq!(state, State::CompressorRun);
        assert_eq!(state.transition(Event::CompressorFinished), State::Idle);
    }

    #[test]
    fn test_stop_returns_to_idle_from_any_busy_state() {
        for state in [State::Pressurizing, State::Cycling, State::CompressorRun] {
            assert_eq!(state.transition(Event::Stopped), State::Idle);
        }
    }

    #[test]
    fn test_fault_from_any_state() {
        for state in [State::Boot, State::Idle, State::Cycling, State::CompressorRun] {
            let next = state.transition(Event::FaultDetected(FaultKind::CaseOpen));
            assert!(matches!(next, State::Fault(FaultKind::CaseOpen)));
            assert!(!next.actuation_allowed());
        }
    }

    #[test]
    fn test_fault_clears_to_idle() {
        let state = State::Fault(FaultKind::HomingTimeout).transition(Event::FaultCleared);
        assert_eq!(state, State::Idle);
    }

    #[test]
    fn test_buttons_ignored_while_busy() {
        assert_eq!(
            State::Cycling.transition(Event::StartReleased),
            State::Cycling
        );
        assert_eq!(
            State::CompressorRun.transition(Event::ResetReleased),
            State::CompressorRun
        );
    }
}
