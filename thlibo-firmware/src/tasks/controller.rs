//! Main controller task
//!
//! Owns every piece of machine hardware. Boot runs a pre-charge and the
//! first homing pass; after that the task waits for operator buttons and
//! runs the blocking cycle logic inline. While a cycle is running the
//! other tasks starve, which is intended - the only control honored
//! mid-cycle is the stop button, read synchronously as the cancel token.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;

use thlibo_core::cycle::{
    run_compressor, CompressorOutcome, CycleContext, CycleController, CycleOutcome, CycleReport,
    PrechargeOutcome, Rig,
};
use thlibo_core::motion::StepSequencer;
use thlibo_core::safety::Interlock;
use thlibo_core::state::{Event, FaultKind, State};
use thlibo_core::traits::StatusDisplay;
use thlibo_drivers::Indicator;

use crate::channels::{ButtonEvent, BUTTON_EVENTS};
use crate::config::persistence;
use crate::display::screens;
use crate::flash::FlashStore;
use crate::io::{Beam, BlockingDelay, CoilBank, Lcd, MachineRig, RelayOut, StopButton, Uptime};
use crate::tasks::tick::TICK_SIGNAL;

/// Reset button forces at least this much pre-charge
const RESET_PRECHARGE_FLOOR_SECS: u32 = 15;

/// Raw hardware handed over from `main`
///
/// The rig is assembled inside the task because the stepper timing comes
/// from the flash-loaded configuration.
pub struct Hardware {
    pub coils: CoilBank,
    pub home: Beam,
    pub payload: Beam,
    pub case: Beam,
    pub crusher: RelayOut,
    pub compressor: RelayOut,
    pub display: Lcd,
    pub led1: Indicator<Output<'static>>,
    pub led2: Indicator<Output<'static>>,
    pub stop: StopButton,
    pub store: FlashStore<'static>,
}

/// The assembled machine
struct Machine {
    rig: MachineRig,
    display: Lcd,
    led1: Indicator<Output<'static>>,
    led2: Indicator<Output<'static>>,
    stop: StopButton,
    store: FlashStore<'static>,
}

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(hw: Hardware) {
    info!("Controller task started");

    let Hardware {
        coils,
        home,
        payload,
        case,
        crusher,
        compressor,
        mut display,
        led1,
        led2,
        stop,
        mut store,
    } = hw;

    // Bring the display up first so the POST banner shows while flash loads
    if display.init().is_err() {
        warn!("LCD init failed, continuing headless");
    }
    let (top, bottom) = screens::boot();
    display.splash(top, bottom);

    let config = persistence::load_machine_config(&mut store).await;
    if let Some(secs) = persistence::load_last_run(&mut store).await {
        // No RTC on this board: the age of a previous-session run is
        // unknowable, so the boot pre-charge stays conservative (full
        // recharge). The record still marks the last service run.
        info!("Previous session last ran at {}s uptime", secs);
    }

    let sequencer = StepSequencer::new(coils, BlockingDelay, config.stepper.step_delay_ms);
    let rig = Rig::new(
        sequencer,
        home,
        payload,
        Interlock::new(case),
        crusher,
        compressor,
    );
    let mut machine = Machine {
        rig,
        display,
        led1,
        led2,
        stop,
        store,
    };

    let controller = CycleController::new(&config);
    let clock = Uptime;
    let mut delay = BlockingDelay;
    let mut ctx = CycleContext::new();
    let mut state = State::Boot.transition(Event::BootComplete);
    info!("Boot pre-charge starting");

    // Boot sequence: pre-charge, then the first homing pass
    let secs = controller.precharge_secs(&ctx, &clock);
    state = match controller.precharge(
        &mut machine.rig,
        &mut machine.display,
        &mut delay,
        &machine.stop,
        secs,
    ) {
        PrechargeOutcome::Completed => {
            let state = state.transition(Event::PressurizeComplete);
            machine.led1.set(true);
            let report = controller.run_once(
                &mut machine.rig,
                &mut machine.display,
                &mut delay,
                &clock,
                &machine.stop,
                &mut ctx,
            );
            machine.led1.set(false);
            conclude(&mut machine, state, report, &mut ctx).await
        }
        PrechargeOutcome::Cancelled => {
            machine.rig.make_safe();
            state.transition(Event::Stopped)
        }
        PrechargeOutcome::SafetyAborted => {
            machine.rig.make_safe();
            abort_to_fault(&mut machine, state, FaultKind::CaseOpen)
        }
    };
    info!("Boot complete, entering idle loop");

    let mut shown_green: Option<bool> = None;
    loop {
        match select(BUTTON_EVENTS.receive(), TICK_SIGNAL.wait()).await {
            Either::First(event) => {
                debug!("Button: {:?}", event);
                if state != State::Idle {
                    continue;
                }
                shown_green = None;

                match event {
                    ButtonEvent::Start => {
                        state = state.transition(Event::StartReleased);
                        state = run_cycle(&mut machine, &controller, state, &mut ctx).await;
                    }

                    ButtonEvent::Reset => {
                        state = state.transition(Event::ResetReleased);
                        let secs = controller
                            .precharge_secs(&ctx, &clock)
                            .max(RESET_PRECHARGE_FLOOR_SECS);
                        state = match controller.precharge(
                            &mut machine.rig,
                            &mut machine.display,
                            &mut delay,
                            &machine.stop,
                            secs,
                        ) {
                            PrechargeOutcome::Completed => {
                                let state = state.transition(Event::PressurizeComplete);
                                run_cycle(&mut machine, &controller, state, &mut ctx).await
                            }
                            PrechargeOutcome::Cancelled => {
                                machine.rig.make_safe();
                                state.transition(Event::Stopped)
                            }
                            PrechargeOutcome::SafetyAborted => {
                                machine.rig.make_safe();
                                abort_to_fault(&mut machine, state, FaultKind::CaseOpen)
                            }
                        };
                    }

                    ButtonEvent::Compressor => {
                        state = state.transition(Event::CompressorReleased);
                        let outcome = run_compressor(
                            &mut machine.rig.compressor,
                            &mut machine.display,
                            &mut delay,
                            &machine.stop,
                            config.cycle.compressor_run_secs,
                        );
                        info!("Compressor run: {:?}", outcome);
                        if outcome == CompressorOutcome::Completed {
                            ctx.record_run(&clock);
                        }
                        if let Some(secs) = ctx.last_run_secs {
                            persistence::save_last_run(&mut machine.store, secs).await;
                        }
                        state = state.transition(Event::CompressorFinished);
                    }
                }
            }

            Either::Second(_now_ms) => {
                // Idle status line: green once the tank has had time to
                // bleed off, red right after a run
                if state == State::Idle {
                    let elapsed = ctx.elapsed(&clock).unwrap_or(u64::MAX);
                    let green = elapsed >= config.ui.idle_status_secs;
                    if shown_green != Some(green) {
                        let (top, bottom) = screens::idle(green);
                        machine.display.splash(top, bottom);
                        shown_green = Some(green);
                        debug!("Idle status set to {}", if green { "Green" } else { "Red" });
                    }
                }
            }
        }
    }
}

/// Run one full cycle with the work LEDs on, then conclude
async fn run_cycle(
    machine: &mut Machine,
    controller: &CycleController,
    state: State,
    ctx: &mut CycleContext,
) -> State {
    let clock = Uptime;
    let mut delay = BlockingDelay;

    machine.led1.set(true);
    machine.led2.set(true);
    let report = controller.run(
        &mut machine.rig,
        &mut machine.display,
        &mut delay,
        &clock,
        &machine.stop,
        ctx,
    );
    machine.led1.set(false);
    machine.led2.set(false);

    conclude(machine, state, report, ctx).await
}

/// Show the outcome, blink the matching pattern, persist, settle to idle
async fn conclude(
    machine: &mut Machine,
    state: State,
    report: CycleReport,
    ctx: &mut CycleContext,
) -> State {
    info!(
        "Cycle finished: {:?}, {} crushed",
        report.outcome, report.crushed
    );
    let (top, bottom) = screens::outcome(report.outcome);
    machine.display.splash(top, bottom);

    let mut blink_delay = embassy_time::Delay;
    if report.outcome.is_fault() {
        machine.led1.blink_error(&mut blink_delay);
        machine.led2.blink_error(&mut blink_delay);
    } else {
        machine.led1.blink_success(&mut blink_delay);
        machine.led2.blink_success(&mut blink_delay);
    }

    if !matches!(
        report.outcome,
        CycleOutcome::SafetyAborted | CycleOutcome::Cancelled
    ) {
        if let Some(secs) = ctx.last_run_secs {
            persistence::save_last_run(&mut machine.store, secs).await;
        }
    }

    match report.outcome {
        CycleOutcome::SafetyAborted => state
            .transition(Event::FaultDetected(FaultKind::CaseOpen))
            .transition(Event::FaultCleared),
        CycleOutcome::HomingTimedOut => state
            .transition(Event::FaultDetected(FaultKind::HomingTimeout))
            .transition(Event::FaultCleared),
        CycleOutcome::Cancelled => state.transition(Event::Stopped),
        _ => state.transition(Event::CycleFinished),
    }
}

/// Display and blink a fault, then clear back to idle
fn abort_to_fault(machine: &mut Machine, state: State, kind: FaultKind) -> State {
    warn!("Fault: {:?}", kind);
    let (top, bottom) = screens::fault(kind);
    machine.display.splash(top, bottom);

    let mut blink_delay = embassy_time::Delay;
    machine.led1.blink_error(&mut blink_delay);
    machine.led2.blink_error(&mut blink_delay);

    state
        .transition(Event::FaultDetected(kind))
        .transition(Event::FaultCleared)
}
