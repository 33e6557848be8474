//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Operator button events, published on the release edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Start button: run a cycle
    Start,
    /// Reset button: pre-charge (15 s floor), then run a cycle
    Reset,
    /// Compressor button: standalone compressor run
    Compressor,
}

/// Channel capacity for button events
const BUTTON_CHANNEL_SIZE: usize = 4;

/// Button events from the button poll task
pub static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_CHANNEL_SIZE> =
    Channel::new();
