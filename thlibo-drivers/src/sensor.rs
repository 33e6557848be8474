//! Digital sensor inputs
//!
//! IR break-beam pairs and microswitches, wired with pull-ups so the
//! asserted state is usually a low pin. Polarity is fixed at
//! construction; everything above this sees only logical assertion.

use embedded_hal::digital::InputPin;

use thlibo_core::traits::DigitalSensor;

/// A polarity-normalized digital input
pub struct DigitalInput<P: InputPin> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> DigitalInput<P> {
    /// Sensor asserts when the pin reads low (pull-up wiring)
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    /// Sensor asserts when the pin reads high
    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }
}

impl<P: InputPin> DigitalSensor for DigitalInput<P> {
    fn is_active(&mut self) -> bool {
        // A read failure counts as not-asserted; GPIO reads are
        // infallible on every supported board anyway
        let high = self.pin.is_high().unwrap_or(self.active_low);
        high != self.active_low
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

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    #[test]
    fn test_active_low_asserts_on_low_pin() {
        let mut sensor = DigitalInput::active_low(MockPin { high: false });
        assert!(sensor.is_active());
        let mut sensor = DigitalInput::active_low(MockPin { high: true });
        assert!(!sensor.is_active());
    }

    #[test]
    fn test_active_high_asserts_on_high_pin() {
        let mut sensor = DigitalInput::active_high(MockPin { high: true });
        assert!(sensor.is_active());
        let mut sensor = DigitalInput::active_high(MockPin { high: false });
        assert!(!sensor.is_active());
    }
}
