//! Safety interlock logic

pub mod interlock;

pub use interlock::{Interlock, SafetyViolation};
