//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.
//! The controller task owns all machine hardware; the button and tick
//! tasks only run while the controller is idle, which matches the
//! machine's semantics - buttons are ignored mid-cycle, and stop is read
//! synchronously inside the blocking control path.

pub mod buttons;
pub mod controller;
pub mod tick;

pub use buttons::{button_task, ButtonPins};
pub use controller::{controller_task, Hardware};
pub use tick::tick_task;
