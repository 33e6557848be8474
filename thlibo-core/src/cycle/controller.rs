//! Cycle controller
//!
//! Runs one operator-triggered cycle: verify safety, pre-charge, probe,
//! load, crush, repeat until the probe comes up empty or the iteration
//! cap is hit. Every terminal path re-homes the loader (unless the case
//! is open) and leaves all outputs in their safe state.

use core::fmt::Write;

use heapless::String;

use crate::config::{CycleConfig, MachineConfig, ProbeConfig};
use crate::motion::{
    Direction, HomingController, HomingOutcome, Interrupted, ObjectProbe, Presence, StepOutcome,
};
use crate::traits::{
    CancelToken, Clock, Delay, DigitalSensor, NeverCancel, PhaseOutputs, StatusDisplay,
    SwitchOutput,
};

use super::context::CycleContext;
use super::outcome::{CycleOutcome, CycleReport};
use super::pressure::PressureScheduler;
use super::rig::Rig;

/// Result of the pre-charge countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrechargeOutcome {
    /// Countdown finished; compressor left on
    Completed,
    /// Operator interrupt; compressor off
    Cancelled,
    /// Interlock opened mid-countdown; caller runs the abort path
    SafetyAborted,
}

/// Named states of the cycle loop
///
/// The safety check is re-entered at the top of every iteration, not
/// only at cycle entry - the enclosure may be opened mid-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleState {
    SafetyCheck(Resume),
    Pressurize,
    Probe,
    LoadAndCrush(Presence),
}

/// Where a passing safety check resumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Pressurize,
    Probe,
}

/// Orchestrates homing, probing, and crush actuation
pub struct CycleController {
    config: CycleConfig,
    offsets: ProbeConfig,
    homing: HomingController,
    probe: ObjectProbe,
    pressure: PressureScheduler,
}

impl CycleController {
    /// Build a controller from the machine configuration
    pub fn new(machine: &MachineConfig) -> Self {
        Self {
            config: machine.cycle,
            offsets: machine.probe,
            homing: HomingController::new(machine.homing),
            probe: ObjectProbe::new(machine.probe),
            pressure: PressureScheduler::new(machine.pressure),
        }
    }

    /// Run a full cycle: probe and crush until nothing is found
    ///
    /// Transitions: SafetyCheck -> Pressurize -> Probe -> LoadAndCrush ->
    /// SafetyCheck -> Probe -> ... until a terminal outcome breaks the
    /// loop. The terminal path (`finish`) re-homes and updates the
    /// context timestamp.
    pub fn run<P, D, H, L, S, C, K>(
        &self,
        rig: &mut Rig<P, D, H, L, S, C, K>,
        display: &mut impl StatusDisplay,
        delay: &mut impl Delay,
        clock: &impl Clock,
        cancel: &impl CancelToken,
        ctx: &mut CycleContext,
    ) -> CycleReport
    where
        P: PhaseOutputs,
        D: Delay,
        H: DigitalSensor,
        L: DigitalSensor,
        S: DigitalSensor,
        C: SwitchOutput,
        K: SwitchOutput,
    {
        let mut crushed: u8 = 0;
        let mut iterations: u8 = 0;
        let mut state = CycleState::SafetyCheck(Resume::Pressurize);

        let outcome = loop {
            state = match state {
                CycleState::SafetyCheck(resume) => {
                    if rig.interlock.ensure_safe().is_err() {
                        break self.safety_abort(rig, display);
                    }
                    match resume {
                        Resume::Pressurize => {
                            display.splash("Safe to Run", "");
                            CycleState::Pressurize
                        }
                        Resume::Probe => CycleState::Probe,
                    }
                }

                CycleState::Pressurize => {
                    let secs = self
                        .pressure
                        .precharge_after(ctx.last_run_secs, clock.now_secs());
                    match self.precharge(rig, display, delay, cancel, secs) {
                        PrechargeOutcome::Completed => CycleState::Probe,
                        PrechargeOutcome::Cancelled => break CycleOutcome::Cancelled,
                        PrechargeOutcome::SafetyAborted => break self.safety_abort(rig, display),
                    }
                }

                CycleState::Probe => {
                    match self
                        .homing
                        .run(&mut rig.sequencer, &mut rig.home, clock, cancel)
                    {
                        HomingOutcome::Homed => {}
                        HomingOutcome::TimedOut => {
                            display.splash("Timeout...", "Loader Jammed!");
                            break CycleOutcome::HomingTimedOut;
                        }
                        HomingOutcome::Cancelled => break CycleOutcome::Cancelled,
                    }
                    match self
                        .probe
                        .glance(&mut rig.sequencer, &mut rig.payload, cancel)
                    {
                        Err(Interrupted) => break CycleOutcome::Cancelled,
                        Ok(Presence::Absent) => break CycleOutcome::NoObjectFound,
                        Ok(found) => {
                            if iterations >= self.config.max_iterations {
                                break CycleOutcome::IterationLimitExceeded;
                            }
                            CycleState::LoadAndCrush(found)
                        }
                    }
                }

                CycleState::LoadAndCrush(found) => {
                    iterations += 1;
                    display.splash("Can Found", "");
                    if self.load(rig, found, cancel) == StepOutcome::Cancelled {
                        break CycleOutcome::Cancelled;
                    }
                    // Fresh interlock read immediately before the pneumatics move
                    if rig.interlock.ensure_safe().is_err() {
                        break self.safety_abort(rig, display);
                    }
                    self.crush(rig, display, delay);
                    crushed += 1;
                    CycleState::SafetyCheck(Resume::Probe)
                }
            };
        };

        let outcome = self.finish(rig, display, clock, cancel, ctx, outcome);
        CycleReport { outcome, crushed }
    }

    /// The boot-time single pass: home, glance, crush at most one object
    ///
    /// This is the only path that reports [`CycleOutcome::ObjectCrushed`];
    /// the looping [`run`](Self::run) reports the reason its loop ended
    /// and carries the crush count in the report.
    pub fn run_once<P, D, H, L, S, C, K>(
        &self,
        rig: &mut Rig<P, D, H, L, S, C, K>,
        display: &mut impl StatusDisplay,
        delay: &mut impl Delay,
        clock: &impl Clock,
        cancel: &impl CancelToken,
        ctx: &mut CycleContext,
    ) -> CycleReport
    where
        P: PhaseOutputs,
        D: Delay,
        H: DigitalSensor,
        L: DigitalSensor,
        S: DigitalSensor,
        C: SwitchOutput,
        K: SwitchOutput,
    {
        let mut crushed: u8 = 0;

        let outcome = 'pass: {
            if rig.interlock.ensure_safe().is_err() {
                break 'pass self.safety_abort(rig, display);
            }
            display.splash("Safe to Run", "");

            match self
                .homing
                .run(&mut rig.sequencer, &mut rig.home, clock, cancel)
            {
                HomingOutcome::Homed => {}
                HomingOutcome::TimedOut => {
                    display.splash("Timeout...", "");
                    break 'pass CycleOutcome::HomingTimedOut;
                }
                HomingOutcome::Cancelled => break 'pass CycleOutcome::Cancelled,
            }

            let found = match self
                .probe
                .glance(&mut rig.sequencer, &mut rig.payload, cancel)
            {
                Err(Interrupted) => break 'pass CycleOutcome::Cancelled,
                Ok(Presence::Absent) => break 'pass CycleOutcome::NoObjectFound,
                Ok(found) => found,
            };

            let secs = self
                .pressure
                .precharge_after(ctx.last_run_secs, clock.now_secs());
            match self.precharge(rig, display, delay, cancel, secs) {
                PrechargeOutcome::Completed => {}
                PrechargeOutcome::Cancelled => break 'pass CycleOutcome::Cancelled,
                PrechargeOutcome::SafetyAborted => break 'pass self.safety_abort(rig, display),
            }

            if self.load(rig, found, cancel) == StepOutcome::Cancelled {
                break 'pass CycleOutcome::Cancelled;
            }
            if rig.interlock.ensure_safe().is_err() {
                break 'pass self.safety_abort(rig, display);
            }
            self.crush(rig, display, delay);
            crushed = 1;
            display.splash("Can Found", "and Crushed!");
            CycleOutcome::ObjectCrushed
        };

        let outcome = self.finish(rig, display, clock, cancel, ctx, outcome);
        CycleReport { outcome, crushed }
    }

    /// Pre-charge countdown: compressor on, one display update per tick
    ///
    /// Public so the firmware can run the boot-time pre-charge (and the
    /// reset path with its 15 s floor) through the same code.
    pub fn precharge<P, D, H, L, S, C, K>(
        &self,
        rig: &mut Rig<P, D, H, L, S, C, K>,
        display: &mut impl StatusDisplay,
        delay: &mut impl Delay,
        cancel: &impl CancelToken,
        secs: u32,
    ) -> PrechargeOutcome
    where
        P: PhaseOutputs,
        D: Delay,
        H: DigitalSensor,
        L: DigitalSensor,
        S: DigitalSensor,
        C: SwitchOutput,
        K: SwitchOutput,
    {
        rig.compressor.set_on(true);
        for remaining in (1..=secs).rev() {
            if cancel.is_cancelled() {
                rig.compressor.set_on(false);
                return PrechargeOutcome::Cancelled;
            }
            if rig.interlock.ensure_safe().is_err() {
                return PrechargeOutcome::SafetyAborted;
            }
            display.splash("Pressurizing....", &countdown_line(remaining));
            delay.delay_ms(self.config.countdown_tick_ms);
        }
        PrechargeOutcome::Completed
    }

    /// Scheduled pre-charge seconds for the current context
    pub fn precharge_secs(&self, ctx: &CycleContext, clock: &impl Clock) -> u32 {
        self.pressure
            .precharge_after(ctx.last_run_secs, clock.now_secs())
    }

    /// Rotate the probed object in front of the crusher
    fn load<P, D, H, L, S, C, K>(
        &self,
        rig: &mut Rig<P, D, H, L, S, C, K>,
        found: Presence,
        cancel: &impl CancelToken,
    ) -> StepOutcome
    where
        P: PhaseOutputs,
        D: Delay,
        H: DigitalSensor,
        L: DigitalSensor,
        S: DigitalSensor,
        C: SwitchOutput,
        K: SwitchOutput,
    {
        if found.needs_restore() {
            // The backward-offset classification leaves the shaft behind
            // the reference angle; bring it back before loading.
            let restore = rig
                .sequencer
                .angle(self.offsets.back_degrees as i32, Direction::Forward, cancel);
            if restore == StepOutcome::Cancelled {
                return StepOutcome::Cancelled;
            }
        }
        rig.sequencer
            .angle(self.config.load_degrees as i32, Direction::Forward, cancel)
    }

    /// The crush actuation ladder
    ///
    /// Compressor off, vent settle, extend, dwell, retract, settle,
    /// compressor on, re-pressure settle. No cancellation point between
    /// extend and retract: a started stroke always completes so the ram
    /// is never left out.
    fn crush<P, D, H, L, S, C, K>(
        &self,
        rig: &mut Rig<P, D, H, L, S, C, K>,
        display: &mut impl StatusDisplay,
        delay: &mut impl Delay,
    ) where
        P: PhaseOutputs,
        D: Delay,
        H: DigitalSensor,
        L: DigitalSensor,
        S: DigitalSensor,
        C: SwitchOutput,
        K: SwitchOutput,
    {
        let t = &self.config.crush;
        display.splash("Crushing!!", "");
        rig.compressor.set_on(false);
        delay.delay_ms(t.vent_ms);
        rig.crusher.set_on(true);
        delay.delay_ms(t.dwell_ms);
        display.line(1, "Retracting!!");
        rig.crusher.set_on(false);
        delay.delay_ms(t.retract_ms);
        display.splash("Crush Complete", "");
        rig.compressor.set_on(true);
        delay.delay_ms(t.repressure_ms);
    }

    /// Abort in place: retreat a little, then force every output safe
    ///
    /// The retreat runs on an uncancellable token so the mechanism is
    /// not left mid-motion even while the operator holds stop.
    fn safety_abort<P, D, H, L, S, C, K>(
        &self,
        rig: &mut Rig<P, D, H, L, S, C, K>,
        display: &mut impl StatusDisplay,
    ) -> CycleOutcome
    where
        P: PhaseOutputs,
        D: Delay,
        H: DigitalSensor,
        L: DigitalSensor,
        S: DigitalSensor,
        C: SwitchOutput,
        K: SwitchOutput,
    {
        display.splash("Rotator Jammed", "");
        rig.sequencer.step(
            -(self.config.retreat_steps as i32),
            Direction::Forward,
            &NeverCancel,
        );
        rig.make_safe();
        CycleOutcome::SafetyAborted
    }

    /// Terminal path: outputs safe, mandatory re-home, context update
    ///
    /// The re-home is skipped after a safety abort - the interlock
    /// invariant forbids actuation while the case is open. A re-home
    /// timeout downgrades an otherwise successful outcome.
    fn finish<P, D, H, L, S, C, K>(
        &self,
        rig: &mut Rig<P, D, H, L, S, C, K>,
        _display: &mut impl StatusDisplay,
        clock: &impl Clock,
        cancel: &impl CancelToken,
        ctx: &mut CycleContext,
        outcome: CycleOutcome,
    ) -> CycleOutcome
    where
        P: PhaseOutputs,
        D: Delay,
        H: DigitalSensor,
        L: DigitalSensor,
        S: DigitalSensor,
        C: SwitchOutput,
        K: SwitchOutput,
    {
        rig.crusher.set_on(false);
        rig.compressor.set_on(false);
        rig.sequencer.release();

        let outcome = if outcome == CycleOutcome::SafetyAborted {
            outcome
        } else {
            match self
                .homing
                .run(&mut rig.sequencer, &mut rig.home, clock, cancel)
            {
                HomingOutcome::Homed | HomingOutcome::Cancelled => outcome,
                HomingOutcome::TimedOut if outcome.is_success() => CycleOutcome::HomingTimedOut,
                HomingOutcome::TimedOut => outcome,
            }
        };

        if !matches!(
            outcome,
            CycleOutcome::SafetyAborted | CycleOutcome::Cancelled
        ) {
            ctx.record_run(clock);
        }
        outcome
    }
}

fn countdown_line(remaining: u32) -> String<16> {
    let mut line = String::new();
    let _ = write!(line, "Countdown = {}", remaining);
    line
}
