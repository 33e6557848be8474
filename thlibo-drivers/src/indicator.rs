//! LED indicator patterns
//!
//! Every terminal outcome gets a distinct blink so an operator can tell
//! "nothing to crush" from "mechanism jammed" without reading the LCD:
//! fast flutter for success, slow triple blink for faults.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// A status LED
pub struct Indicator<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> Indicator<P> {
    /// Wrap the LED pin, starting dark
    pub fn new(pin: P) -> Self {
        let mut led = Self { pin };
        led.set(false);
        led
    }

    /// Steady on/off
    pub fn set(&mut self, on: bool) {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.ok();
    }

    /// Blocking blink: `times` cycles of on/off
    ///
    /// Ends dark regardless of the prior state.
    pub fn blink(&mut self, delay: &mut impl DelayNs, times: u8, on_ms: u32, off_ms: u32) {
        for _ in 0..times {
            self.set(true);
            delay.delay_ms(on_ms);
            self.set(false);
            delay.delay_ms(off_ms);
        }
    }

    /// Fast flutter: cycle finished normally
    pub fn blink_success(&mut self, delay: &mut impl DelayNs) {
        self.blink(delay, 10, 70, 70);
    }

    /// Slow triple blink: timeout or safety fault
    pub fn blink_error(&mut self, delay: &mut impl DelayNs) {
        self.blink(delay, 3, 500, 500);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct MockPin {
        high: bool,
        toggles: u32,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            if self.high {
                self.toggles += 1;
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            if !self.high {
                self.toggles += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    struct CountingDelay {
        total_ms: u32,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }
    }

    #[test]
    fn test_success_blink_timing() {
        let mut led = Indicator::new(MockPin {
            high: false,
            toggles: 0,
        });
        let mut delay = CountingDelay { total_ms: 0 };
        led.blink_success(&mut delay);
        assert_eq!(led.pin.toggles, 20, "10 on/off cycles");
        assert_eq!(delay.total_ms, 10 * (70 + 70));
        assert!(!led.pin.high, "ends dark");
    }

    #[test]
    fn test_error_blink_timing() {
        let mut led = Indicator::new(MockPin {
            high: false,
            toggles: 0,
        });
        let mut delay = CountingDelay { total_ms: 0 };
        led.blink_error(&mut delay);
        assert_eq!(led.pin.toggles, 6);
        assert_eq!(delay.total_ms, 3 * (500 + 500));
    }
}
