//! Adapters between embassy-rp peripherals and the core trait seams
//!
//! The core is blocking by design (a control loop polling physical
//! sensors, not a multiplexed server); these adapters give it time and
//! cancellation from the embassy world.

use embassy_rp::gpio::{Input, Output};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{block_for, Duration, Instant};

use thlibo_core::cycle::Rig;
use thlibo_core::traits::{CancelToken, Clock, Delay};
use thlibo_drivers::{DigitalInput, Lcd1602, Relay, Uln2003};

/// Blocking millisecond delay over the embassy time driver
pub struct BlockingDelay;

impl Delay for BlockingDelay {
    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}

/// Monotonic seconds since boot
pub struct Uptime;

impl Clock for Uptime {
    fn now_secs(&self) -> u64 {
        Instant::now().as_secs()
    }
}

/// The stop button as the cooperative cancel token
///
/// Read synchronously at every polling point inside the blocking control
/// path, so a held stop button unwinds a cycle even while the button
/// task is starved. Active low (pull-up wiring).
pub struct StopButton {
    input: Input<'static>,
}

impl StopButton {
    pub fn new(input: Input<'static>) -> Self {
        Self { input }
    }
}

impl CancelToken for StopButton {
    fn is_cancelled(&self) -> bool {
        self.input.is_low()
    }
}

/// The loader coil bank
pub type CoilBank = Uln2003<Output<'static>>;

/// A break beam or switch input
pub type Beam = DigitalInput<Input<'static>>;

/// A relay output channel
pub type RelayOut = Relay<Output<'static>>;

/// The fully concrete machine rig
pub type MachineRig = Rig<CoilBank, BlockingDelay, Beam, Beam, Beam, RelayOut, RelayOut>;

/// The 16x2 status LCD on I2C1
pub type Lcd = Lcd1602<I2c<'static, I2C1, Blocking>, embassy_time::Delay>;
