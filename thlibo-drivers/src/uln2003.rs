//! ULN2003 coil driver
//!
//! Four GPIO lines into the ULN2003 Darlington array, one per coil of a
//! 28BYJ-48 unipolar stepper. The driver is dumb on purpose: phase
//! sequencing lives in `thlibo-core`; this just moves pins.

use embedded_hal::digital::OutputPin;

use thlibo_core::traits::PhaseOutputs;

/// ULN2003 driver board over four output pins (IN1..IN4)
pub struct Uln2003<P: OutputPin> {
    pins: [P; 4],
}

impl<P: OutputPin> Uln2003<P> {
    /// Wrap the four coil pins and drive them all low
    ///
    /// Output state does not survive a restart, so the known-safe
    /// de-energized state is asserted here, not assumed.
    pub fn new(in1: P, in2: P, in3: P, in4: P) -> Self {
        let mut driver = Self {
            pins: [in1, in2, in3, in4],
        };
        driver.set_phases([false; 4]);
        driver
    }
}

impl<P: OutputPin> PhaseOutputs for Uln2003<P> {
    fn set_phases(&mut self, phases: [bool; 4]) {
        for (pin, on) in self.pins.iter_mut().zip(phases) {
            // GPIO writes are infallible on every supported board
            let result = if on { pin.set_high() } else { pin.set_low() };
            result.ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: true }
        }
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
    fn test_construction_drives_all_low() {
        // Pins start high to prove the constructor clears them
        let driver = Uln2003::new(
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
        );
        assert!(driver.pins.iter().all(|p| !p.high));
    }

    #[test]
    fn test_phase_vector_maps_to_pins() {
        let mut driver = Uln2003::new(
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
        );
        driver.set_phases([true, false, true, false]);
        assert!(driver.pins[0].high);
        assert!(!driver.pins[1].high);
        assert!(driver.pins[2].high);
        assert!(!driver.pins[3].high);
    }
}
