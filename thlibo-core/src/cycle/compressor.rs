//! Standalone compressor run
//!
//! The operator can run the compressor on its own (filling shop air, not
//! crushing anything). The run is a fixed-length countdown with a
//! per-second display update and a polled stop; the compressor is off on
//! every exit path.

use core::fmt::Write;

use heapless::String;

use crate::traits::{CancelToken, Delay, StatusDisplay, SwitchOutput};

/// Result of a compressor run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompressorOutcome {
    /// Ran for the full duration
    Completed,
    /// Stopped by the operator
    Cancelled,
}

/// Run the compressor for `run_secs`, counting down on the display
///
/// Remaining time is shown in minutes above one minute, in seconds
/// below. The cancel token is polled once per countdown second.
pub fn run_compressor(
    compressor: &mut impl SwitchOutput,
    display: &mut impl StatusDisplay,
    delay: &mut impl Delay,
    cancel: &impl CancelToken,
    run_secs: u32,
) -> CompressorOutcome {
    compressor.set_on(true);

    let mut outcome = CompressorOutcome::Completed;
    for remaining in (1..=run_secs).rev() {
        if cancel.is_cancelled() {
            outcome = CompressorOutcome::Cancelled;
            break;
        }
        display.splash("Compresser ON", &remaining_line(remaining));
        delay.delay_ms(1000);
    }

    compressor.set_on(false);
    display.splash("Compresser", "Stopped");
    outcome
}

fn remaining_line(remaining: u32) -> String<16> {
    let mut line = String::new();
    if remaining < 60 {
        let _ = write!(line, "Seconds = {}", remaining);
    } else {
        let _ = write!(line, "Minutes = {}", remaining / 60);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CancelAfter, NoopDelay, RecordingDisplay, SwitchSpy};
    use crate::traits::NeverCancel;

    #[test]
    fn test_full_run_switches_off_at_end() {
        let mut compressor = SwitchSpy::new();
        let mut display = RecordingDisplay::new();
        let outcome = run_compressor(
            &mut compressor,
            &mut display,
            &mut NoopDelay,
            &NeverCancel,
            3,
        );
        assert_eq!(outcome, CompressorOutcome::Completed);
        assert!(!compressor.is_on());
        assert_eq!(compressor.on_count(), 1);
    }

    #[test]
    fn test_stop_cancels_and_switches_off() {
        let mut compressor = SwitchSpy::new();
        let mut display = RecordingDisplay::new();
        let cancel = CancelAfter::new(2);
        let outcome = run_compressor(
            &mut compressor,
            &mut display,
            &mut NoopDelay,
            &cancel,
            1800,
        );
        assert_eq!(outcome, CompressorOutcome::Cancelled);
        assert!(!compressor.is_on());
    }

    #[test]
    fn test_countdown_switches_units_at_one_minute() {
        assert_eq!(remaining_line(1800).as_str(), "Minutes = 30");
        assert_eq!(remaining_line(60).as_str(), "Minutes = 1");
        assert_eq!(remaining_line(59).as_str(), "Seconds = 59");
    }
}
