//! Button poll task
//!
//! Samples the three operator buttons every 10ms and publishes release
//! edges - the reference machine triggers on release, so a held button
//! does nothing until it is let go.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use thlibo_drivers::{DebouncedButton, Edge};

use crate::channels::{ButtonEvent, BUTTON_EVENTS};

/// The operator button inputs (active low, pull-ups)
pub struct ButtonPins {
    pub start: Input<'static>,
    pub reset: Input<'static>,
    pub compressor: Input<'static>,
}

/// Button poll task
#[embassy_executor::task]
pub async fn button_task(mut pins: ButtonPins) {
    info!("Button task started");

    let mut start = DebouncedButton::new();
    let mut reset = DebouncedButton::new();
    let mut compressor = DebouncedButton::new();

    let mut ticker = Ticker::every(Duration::from_millis(
        DebouncedButton::POLL_INTERVAL_MS as u64,
    ));

    loop {
        ticker.next().await;

        if start.update(pins.start.is_low()) == Some(Edge::Released) {
            debug!("Start released");
            let _ = BUTTON_EVENTS.try_send(ButtonEvent::Start);
        }
        if reset.update(pins.reset.is_low()) == Some(Edge::Released) {
            debug!("Reset released");
            let _ = BUTTON_EVENTS.try_send(ButtonEvent::Reset);
        }
        if compressor.update(pins.compressor.is_low()) == Some(Edge::Released) {
            debug!("Compressor released");
            let _ = BUTTON_EVENTS.try_send(ButtonEvent::Compressor);
        }
    }
}
