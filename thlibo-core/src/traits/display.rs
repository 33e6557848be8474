//! Status display trait
//!
//! The display is a write-only text sink: two rows of sixteen characters
//! with a clear-then-write contract. The core reports state transitions,
//! countdowns and outcomes through it and never consults a return value.

/// Number of character rows
pub const DISPLAY_ROWS: u8 = 2;

/// Number of character columns per row
pub const DISPLAY_COLS: usize = 16;

/// Trait for the 2x16 status display
pub trait StatusDisplay {
    /// Clear both rows
    fn clear(&mut self);

    /// Write text to a row (0 or 1), truncated to [`DISPLAY_COLS`]
    fn line(&mut self, row: u8, text: &str);

    /// Clear then write both rows in one call
    fn splash(&mut self, top: &str, bottom: &str) {
        self.clear();
        self.line(0, top);
        self.line(1, bottom);
    }
}
