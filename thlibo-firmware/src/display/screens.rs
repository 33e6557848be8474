//! Screen text for operator states and outcomes
//!
//! Everything fits the 2x16 character panel. Message wording follows the
//! reference machine where it had one.

use thlibo_core::cycle::CycleOutcome;
use thlibo_core::state::FaultKind;

/// Power-on self test banner
pub fn boot() -> (&'static str, &'static str) {
    ("Thlibo loader", concat!("POST v", env!("CARGO_PKG_VERSION")))
}

/// Idle status; green once the tank has had time to bleed off
pub fn idle(ready_green: bool) -> (&'static str, &'static str) {
    if ready_green {
        ("Loader ready", "Green to start")
    } else {
        ("Loader ready", "Red to start")
    }
}

/// Terminal screen for a cycle outcome
pub fn outcome(outcome: CycleOutcome) -> (&'static str, &'static str) {
    match outcome {
        CycleOutcome::ObjectCrushed => ("Can Found", "and Crushed!"),
        CycleOutcome::NoObjectFound => ("No more cans!!", "Reset in 5 sec"),
        CycleOutcome::IterationLimitExceeded => ("Still loaded!", "Check hopper"),
        CycleOutcome::SafetyAborted => ("Rotator Jammed", "Check case"),
        CycleOutcome::HomingTimedOut => ("Timeout...", "Loader Jammed!"),
        CycleOutcome::Cancelled => ("Program Stop", "by operator"),
    }
}

/// Fault screen
pub fn fault(kind: FaultKind) -> (&'static str, &'static str) {
    match kind {
        FaultKind::CaseOpen => ("Rotator Jammed", "Check case"),
        FaultKind::HomingTimeout => ("Timeout...", "Loader Jammed!"),
    }
}
