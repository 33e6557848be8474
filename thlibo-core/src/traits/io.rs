//! Digital input/output traits
//!
//! The crusher's entire I/O surface is binary: four stepper coil phases,
//! a handful of break-beam/switch sensors, and two pneumatic relays.

/// Trait for the four coil phase outputs of the loader stepper
///
/// Implementations write one 4-bit vector atomically enough that no
/// invalid intermediate phase persists for a full inter-step delay.
pub trait PhaseOutputs {
    /// Drive the four coil phases. `true` = energized.
    fn set_phases(&mut self, phases: [bool; 4]);
}

/// Trait for debounced digital sensors (break beams, switches)
///
/// `is_active` returns the logical assertion of the sensor, with any
/// polarity inversion handled by the implementation: an active home
/// sensor means "shaft aligned", an active interlock means "case open",
/// an active payload sensor means "object in the beam path".
pub trait DigitalSensor {
    /// Read the current debounced sensor state
    fn is_active(&mut self) -> bool;
}

/// Trait for binary actuator outputs (compressor relay, crusher valve)
///
/// Implementations must initialize to the safe state (off) and never
/// assume output state survives a process restart.
pub trait SwitchOutput {
    /// Switch the output on or off
    fn set_on(&mut self, on: bool);

    /// Check the last commanded state
    fn is_on(&self) -> bool;
}
