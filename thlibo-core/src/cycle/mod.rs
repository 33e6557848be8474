//! Load/crush cycle orchestration
//!
//! One cycle: verify safety, pre-charge the tank, probe for an object,
//! load and crush it, repeat until nothing is found or the iteration cap
//! is hit - then re-home and report a terminal outcome to the caller.

pub mod compressor;
pub mod context;
pub mod controller;
pub mod outcome;
pub mod pressure;
pub mod rig;

pub use compressor::{run_compressor, CompressorOutcome};
pub use context::CycleContext;
pub use controller::{CycleController, PrechargeOutcome};
pub use outcome::{CycleOutcome, CycleReport};
pub use pressure::PressureScheduler;
pub use rig::Rig;
