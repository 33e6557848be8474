//! Board-agnostic core logic for the can crusher firmware
//!
//! This crate contains all sequencing logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (phase outputs, sensors, relays, display)
//! - Step sequencing for the geared loader stepper
//! - Homing and object-probe routines
//! - The load/crush cycle controller
//! - Pressure pre-charge scheduling
//! - Operator-level state machine
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod cycle;
pub mod motion;
pub mod safety;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
