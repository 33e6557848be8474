//! HD44780 16x2 character LCD driver
//!
//! The display hangs off a PCF8574 I2C backpack in the usual wiring:
//! P0=RS, P1=RW, P2=EN, P3=backlight, P4..P7=data high nibble. The
//! controller runs in 4-bit mode, so every byte goes out as two
//! EN-pulsed nibble writes.
//!
//! The core treats the display as an infallible write-only sink, so I2C
//! errors are latched here: after the first failed transfer the driver
//! goes quiet instead of stalling the control loop on a flaky bus.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use thlibo_core::traits::display::{StatusDisplay, DISPLAY_COLS};

/// Default PCF8574 backpack address
pub const DEFAULT_ADDR: u8 = 0x27;

/// HD44780 commands
#[allow(dead_code)]
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const DISPLAY_CTRL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM: u8 = 0x80;

    pub const ENTRY_LEFT_TO_RIGHT: u8 = 0x02;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const TWO_LINES_5X8: u8 = 0x08;
}

/// Backpack bit positions
mod pin {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// DDRAM row start addresses for a 16x2 panel
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// HD44780 16x2 driver over a PCF8574 backpack
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
    /// Set after the first failed transfer; all later writes are skipped
    faulted: bool,
}

impl<I2C: I2c, D: DelayNs> Lcd1602<I2C, D> {
    /// Create a driver; call [`init`](Self::init) before writing text
    pub fn new(i2c: I2C, delay: D, addr: u8) -> Self {
        Self {
            i2c,
            delay,
            addr,
            faulted: false,
        }
    }

    /// Power-on initialization into 4-bit, 2-line mode
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        // The controller needs 40ms+ after VDD before it listens
        self.delay.delay_ms(50);

        // Magic 8-bit-mode knocks, then the switch to 4-bit
        self.write_nibble(0x03, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03, false)?;
        self.delay.delay_ms(1);
        self.write_nibble(0x02, false)?;

        self.command(cmd::FUNCTION_SET | cmd::TWO_LINES_5X8)?;
        self.command(cmd::DISPLAY_CTRL | cmd::DISPLAY_ON)?;
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_LEFT_TO_RIGHT)?;
        Ok(())
    }

    fn command(&mut self, byte: u8) -> Result<(), I2C::Error> {
        self.write_byte(byte, false)
    }

    fn data(&mut self, byte: u8) -> Result<(), I2C::Error> {
        self.write_byte(byte, true)
    }

    fn write_byte(&mut self, byte: u8, rs: bool) -> Result<(), I2C::Error> {
        self.write_nibble(byte >> 4, rs)?;
        self.write_nibble(byte & 0x0F, rs)
    }

    fn write_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), I2C::Error> {
        let mut bits = (nibble << 4) | pin::BACKLIGHT;
        if rs {
            bits |= pin::RS;
        }
        // Latch on the EN falling edge
        self.i2c.write(self.addr, &[bits | pin::EN])?;
        self.delay.delay_us(1);
        self.i2c.write(self.addr, &[bits])?;
        self.delay.delay_us(50);
        Ok(())
    }

    /// Run an operation unless a previous transfer already failed
    fn guarded(&mut self, op: impl FnOnce(&mut Self) -> Result<(), I2C::Error>) {
        if self.faulted {
            return;
        }
        if op(self).is_err() {
            // One bad transfer silences the display for the rest of the
            // run; the machine keeps crushing without it
            self.faulted = true;
            #[cfg(feature = "defmt")]
            defmt::warn!("LCD write failed, display disabled");
        }
    }
}

impl<I2C: I2c, D: DelayNs> StatusDisplay for Lcd1602<I2C, D> {
    fn clear(&mut self) {
        self.guarded(|lcd| {
            lcd.command(cmd::CLEAR)?;
            lcd.delay.delay_ms(2);
            Ok(())
        });
    }

    fn line(&mut self, row: u8, text: &str) {
        if row as usize >= ROW_OFFSETS.len() {
            return;
        }
        self.guarded(|lcd| {
            lcd.command(cmd::SET_DDRAM | ROW_OFFSETS[row as usize])?;
            for byte in text.bytes().take(DISPLAY_COLS) {
                lcd.data(byte)?;
            }
            Ok(())
        });
    }
}
