//! Thlibo - Automated Can Crusher Firmware
//!
//! Main firmware binary for the Raspberry Pi Pico controller board.
//! Wires the loader stepper, break-beam sensors, pneumatic relays and
//! status LCD to the board, then hands everything to the controller
//! task.
//!
//! Named after the Greek "thlibo" (θλίβω) meaning "to press, to crush".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use thlibo_drivers::{lcd1602, DigitalInput, Indicator, Lcd1602, Relay, Uln2003};

use crate::flash::FlashStore;
use crate::io::StopButton;
use crate::tasks::{ButtonPins, Hardware};

mod channels;
mod config;
mod display;
mod flash;
mod io;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thlibo firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Loader stepper: ULN2003 IN1..IN4 on GP2..GP5
    let coils = Uln2003::new(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
    );

    // Break beams and the case interlock, active low with pull-ups
    let home = DigitalInput::active_low(Input::new(p.PIN_6, Pull::Up));
    let payload = DigitalInput::active_low(Input::new(p.PIN_7, Pull::Up));
    let case = DigitalInput::active_low(Input::new(p.PIN_8, Pull::Up));

    // Operator buttons; stop doubles as the cycle cancel token
    let start = Input::new(p.PIN_10, Pull::Up);
    let reset = Input::new(p.PIN_11, Pull::Up);
    let compressor_btn = Input::new(p.PIN_12, Pull::Up);
    let stop = StopButton::new(Input::new(p.PIN_13, Pull::Up));

    // Pneumatic relays on low-level trigger boards: idle pin high
    let crusher = Relay::active_low(Output::new(p.PIN_14, Level::High));
    let compressor = Relay::active_low(Output::new(p.PIN_15, Level::High));

    // Status LEDs
    let led1 = Indicator::new(Output::new(p.PIN_16, Level::Low));
    let led2 = Indicator::new(Output::new(p.PIN_17, Level::Low));

    // 16x2 LCD behind a PCF8574 backpack on I2C1 (GP18 SDA, GP19 SCL)
    let i2c_bus = I2c::new_blocking(p.I2C1, p.PIN_19, p.PIN_18, i2c::Config::default());
    let display = Lcd1602::new(i2c_bus, embassy_time::Delay, lcd1602::DEFAULT_ADDR);
    info!("I2C display initialized");

    // Flash store for the config and last-run records
    let store = FlashStore::new(p.FLASH, p.DMA_CH0);

    let hardware = Hardware {
        coils,
        home,
        payload,
        case,
        crusher,
        compressor,
        display,
        led1,
        led2,
        stop,
        store,
    };

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner
        .spawn(tasks::button_task(ButtonPins {
            start,
            reset,
            compressor: compressor_btn,
        }))
        .unwrap();
    spawner.spawn(tasks::controller_task(hardware)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
