//! Shared test doubles for host tests

use core::cell::Cell;

use std::string::String;
use std::vec::Vec;

use crate::traits::{CancelToken, Clock, Delay, DigitalSensor, PhaseOutputs, StatusDisplay, SwitchOutput};

/// Records every phase vector written to the coils
pub struct RecordingCoils {
    pub writes: Vec<[bool; 4]>,
}

impl RecordingCoils {
    pub fn new() -> Self {
        Self { writes: Vec::new() }
    }
}

impl PhaseOutputs for RecordingCoils {
    fn set_phases(&mut self, phases: [bool; 4]) {
        self.writes.push(phases);
    }
}

/// Delay that returns immediately
pub struct NoopDelay;

impl Delay for NoopDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

/// Clock that advances a fixed amount per query
pub struct TickingClock {
    now: Cell<u64>,
    step: u64,
    queries: Cell<u64>,
}

impl TickingClock {
    pub fn new(step: u64) -> Self {
        Self::at(0, step)
    }

    pub fn at(start: u64, step: u64) -> Self {
        Self {
            now: Cell::new(start),
            step,
            queries: Cell::new(0),
        }
    }

    pub fn queries(&self) -> u64 {
        self.queries.get()
    }
}

impl Clock for TickingClock {
    fn now_secs(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.step);
        self.queries.set(self.queries.get() + 1);
        t
    }
}

/// Sensor fed from a fixed script; the last entry repeats forever
pub struct ScriptedSensor {
    script: Vec<bool>,
    pos: usize,
}

impl ScriptedSensor {
    pub fn always(value: bool) -> Self {
        Self::script(&[value])
    }

    pub fn script(readings: &[bool]) -> Self {
        assert!(!readings.is_empty());
        Self {
            script: readings.into(),
            pos: 0,
        }
    }

    /// Inactive for the first `n` reads, active afterwards
    pub fn after(n: usize) -> Self {
        let mut script = std::vec![false; n];
        script.push(true);
        Self { script, pos: 0 }
    }
}

impl DigitalSensor for ScriptedSensor {
    fn is_active(&mut self) -> bool {
        let idx = self.pos.min(self.script.len() - 1);
        self.pos += 1;
        self.script[idx]
    }
}

/// Cancel token that asserts after a number of checks
pub struct CancelAfter {
    remaining: Cell<u32>,
}

impl CancelAfter {
    pub fn new(checks_before_cancel: u32) -> Self {
        Self {
            remaining: Cell::new(checks_before_cancel),
        }
    }
}

impl CancelToken for CancelAfter {
    fn is_cancelled(&self) -> bool {
        let left = self.remaining.get();
        if left == 0 {
            true
        } else {
            self.remaining.set(left - 1);
            false
        }
    }
}

/// Relay spy counting off-to-on transitions
pub struct SwitchSpy {
    on: bool,
    switched_on: u32,
}

impl SwitchSpy {
    pub fn new() -> Self {
        Self {
            on: false,
            switched_on: 0,
        }
    }

    /// Number of off-to-on transitions observed
    pub fn on_count(&self) -> u32 {
        self.switched_on
    }
}

impl SwitchOutput for SwitchSpy {
    fn set_on(&mut self, on: bool) {
        if on && !self.on {
            self.switched_on += 1;
        }
        self.on = on;
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

/// Display capturing every line written
pub struct RecordingDisplay {
    pub lines: Vec<(u8, String)>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|(_, text)| text.contains(needle))
    }
}

impl StatusDisplay for RecordingDisplay {
    fn clear(&mut self) {}

    fn line(&mut self, row: u8, text: &str) {
        self.lines.push((row, text.into()));
    }
}
