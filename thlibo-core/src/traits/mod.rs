//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic
//! and hardware-specific implementations.

pub mod cancel;
pub mod display;
pub mod io;
pub mod time;

pub use cancel::{CancelToken, NeverCancel};
pub use display::StatusDisplay;
pub use io::{DigitalSensor, PhaseOutputs, SwitchOutput};
pub use time::{Clock, Delay};
