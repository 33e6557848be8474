//! Relay outputs
//!
//! The crusher solenoid valve and the compressor contactor sit behind
//! opto-isolated relay boards with low-level triggers, so "on" is a low
//! pin by default. The relay is forced off at construction; output state
//! is never assumed to survive a restart.

use embedded_hal::digital::OutputPin;

use thlibo_core::traits::SwitchOutput;

/// A relay channel behind a GPIO pin
pub struct Relay<P: OutputPin> {
    pin: P,
    /// If true, relay ON = pin LOW (low-level trigger boards)
    active_low: bool,
    /// Last commanded logical state
    on: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Create a relay channel
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut relay = Self {
            pin,
            active_low,
            on: false,
        };
        relay.set_on(false);
        relay
    }

    /// Low-level trigger board (the common opto-isolated modules)
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// High-level trigger board
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, false)
    }
}

impl<P: OutputPin> SwitchOutput for Relay<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;
        let result = if on != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.ok();
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct MockPin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_active_low_relay_idles_high() {
        let relay = Relay::active_low(MockPin { high: false });
        // Off means pin high for a low-level trigger
        assert!(!relay.is_on());
        assert!(relay.pin.high);
    }

    #[test]
    fn test_switching_follows_polarity() {
        let mut relay = Relay::active_low(MockPin { high: false });
        relay.set_on(true);
        assert!(relay.is_on());
        assert!(!relay.pin.high);
        relay.set_on(false);
        assert!(!relay.is_on());
        assert!(relay.pin.high);
    }

    #[test]
    fn test_active_high_relay_idles_low() {
        let mut relay = Relay::active_high(MockPin { high: true });
        assert!(!relay.pin.high);
        relay.set_on(true);
        assert!(relay.pin.high);
    }
}
