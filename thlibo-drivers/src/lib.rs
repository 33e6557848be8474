//! Hardware driver implementations for the Thlibo can crusher
//!
//! Implements the `thlibo-core` trait seams over embedded-hal 1.0:
//!
//! - ULN2003 coil driver for the 28BYJ-48 loader stepper
//! - IR break-beam / switch sensor inputs
//! - Active-low relay outputs (crusher valve, compressor)
//! - Debounced button edge detection
//! - LED blink indicator patterns
//! - HD44780 16x2 character LCD behind a PCF8574 I2C backpack

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod indicator;
pub mod lcd1602;
pub mod relay;
pub mod sensor;
pub mod uln2003;

pub use button::{DebouncedButton, Edge};
pub use indicator::Indicator;
pub use lcd1602::Lcd1602;
pub use relay::Relay;
pub use sensor::DigitalInput;
pub use uln2003::Uln2003;
