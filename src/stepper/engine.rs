//! Real-time execution engine.
//!
//! [`Stepper::tick`] runs at the configured tick frequency. Each call applies
//! the port image staged by the previous call, loads a segment when needed,
//! advances the velocity ramp, and decrements the inverse-time counter by the
//! current rate. When the counter goes negative a step event fires and three
//! Bresenham counters decide which axes step.
//!
//! [`Stepper::on_pulse_reset`] is the one-shot callback armed after every port
//! write; it returns the step lines to their idle level.
//!
//! [`Stepper::prepare_segments`] belongs to the background context and keeps
//! the segment ring filled.

use embedded_hal::delay::DelayNs;

use crate::axis::{Axis, PortBits, N_AXIS};
use crate::config::units::Steps;
use crate::config::StepperSettings;
use crate::error::{Error, PortError, Result};
use crate::motion::RampState;
use crate::planner::Planner;
use crate::segment::{
    FixedSegmentSize, SegmentBuffer, SegmentDataRing, SegmentPreparer, SegmentSizing,
};

use super::builder::StepperBuilder;
use super::port::StepperPort;
use super::position::MachinePosition;
use super::runtime::{ActiveBlock, LoadState, StepperRuntime};
use super::state::RunState;

/// The stepper segment pipeline and its execution engine.
///
/// Generic over:
/// - `P`: planner the blocks come from
/// - `H`: hardware port
/// - `D`: delay provider for the idle settle time
/// - `S`: segment sizing policy (defaults to [`FixedSegmentSize`])
///
/// The embedder calls [`tick`](Self::tick) from the periodic tick source,
/// [`on_pulse_reset`](Self::on_pulse_reset) from the pulse-reset timer, and
/// [`prepare_segments`](Self::prepare_segments) from the main loop, sharing
/// the engine between contexts with whatever its scheduler provides.
pub struct Stepper<P, H, D, S = FixedSegmentSize>
where
    P: Planner,
    H: StepperPort,
    D: DelayNs,
    S: SegmentSizing,
{
    planner: P,
    port: H,
    delay: D,
    settings: StepperSettings,
    sizing: S,
    runtime: StepperRuntime,
    segments: SegmentBuffer,
    segment_data: SegmentDataRing,
    preparer: SegmentPreparer,
    position: MachinePosition,
    run_state: RunState,
    cycle_stop: bool,
}

impl<P, H, D> Stepper<P, H, D, FixedSegmentSize>
where
    P: Planner,
    H: StepperPort,
    D: DelayNs,
{
    /// Start building an engine.
    pub fn builder() -> StepperBuilder<P, H, D, FixedSegmentSize> {
        StepperBuilder::new()
    }
}

impl<P, H, D, S> Stepper<P, H, D, S>
where
    P: Planner,
    H: StepperPort,
    D: DelayNs,
    S: SegmentSizing,
{
    pub(crate) fn new(
        planner: P,
        port: H,
        delay: D,
        settings: StepperSettings,
        sizing: S,
    ) -> Self {
        let mut stepper = Self {
            planner,
            port,
            delay,
            settings,
            sizing,
            runtime: StepperRuntime::default(),
            segments: SegmentBuffer::new(),
            segment_data: SegmentDataRing::new(),
            preparer: SegmentPreparer::new(),
            position: MachinePosition::new(),
            run_state: RunState::Idle,
            cycle_stop: false,
        };
        stepper.reset();
        stepper
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Reset the engine, park the port lines and leave the drivers idle.
    pub fn init(&mut self) -> Result<()> {
        self.reset();
        self.port.write_output(self.settings.invert_mask)?;
        self.wake_up()?;
        self.go_idle()?;
        info!("stepper initialized");
        Ok(())
    }

    /// Clear the runtime state and the segment pipeline.
    ///
    /// Preparation restarts from the planner's current block. Machine
    /// position and run state are kept.
    pub fn reset(&mut self) {
        self.runtime = StepperRuntime::default();
        self.segments.clear();
        self.segment_data.reset();
        self.preparer.reset(self.planner.tail_index());
        debug!("stepper reset");
    }

    /// Enable the drivers and, in [`RunState::Cycle`], start ticking.
    pub fn wake_up(&mut self) -> Result<()> {
        self.port
            .write_disable_line(self.settings.disable_line_when_enabled())?;

        if self.run_state == RunState::Cycle {
            self.runtime.out_bits = self.settings.invert_mask;
            self.runtime.execute_step = false;
            self.runtime.load = LoadState::Block;
            self.port.start_ticks();
            debug!("stepper awake");
        }
        Ok(())
    }

    /// Stop ticking, then disable the drivers after the idle lock time.
    ///
    /// Drivers stay enabled when `keep_enabled_when_idle` is set, except in
    /// [`RunState::Alarm`].
    pub fn go_idle(&mut self) -> Result<()> {
        self.port.stop_ticks();
        self.runtime.busy = false;

        if !self.settings.keep_enabled_when_idle || self.run_state == RunState::Alarm {
            self.delay.delay_ms(self.settings.idle_lock_time_ms.0);
            self.port
                .write_disable_line(!self.settings.disable_line_when_enabled())?;
        }
        debug!("stepper idle");
        Ok(())
    }

    /// Mark planned motion as waiting for cycle start.
    pub fn queue(&mut self) {
        if self.run_state == RunState::Idle {
            self.run_state = RunState::Queued;
        }
    }

    /// Start queued motion, or resume from a feed hold.
    pub fn cycle_start(&mut self) -> Result<()> {
        match self.run_state {
            RunState::Queued => {
                self.run_state = RunState::Cycle;
                info!("cycle start");
                self.wake_up()
            }
            RunState::Hold => {
                self.run_state = RunState::Cycle;
                info!("cycle resume");
                self.port.start_ticks();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Request a feed hold. Motion stops at the end of the executing segment.
    pub fn feed_hold(&mut self) {
        if self.run_state == RunState::Cycle {
            self.run_state = RunState::Hold;
            info!("feed hold");
        }
    }

    /// Return to [`RunState::Idle`] after a hold or fault.
    ///
    /// Runtime state is left as it is; the planner is responsible for
    /// re-planning any remaining motion.
    pub fn cycle_reinitialize(&mut self) {
        self.run_state = RunState::Idle;
        info!("cycle reinitialize");
    }

    /// Enter [`RunState::Alarm`]: stop ticking and disable the drivers.
    pub fn alarm(&mut self) -> Result<()> {
        self.run_state = RunState::Alarm;
        warn!("stepper alarm");
        self.go_idle()
    }

    /// Fill the segment ring from the planner. Returns the segments emitted.
    ///
    /// Call from the background context until it returns 0.
    pub fn prepare_segments(&mut self) -> usize {
        self.preparer.prepare(
            &self.planner,
            &self.settings,
            &self.sizing,
            &mut self.segments,
            &mut self.segment_data,
        )
    }

    /// Consume the cycle-stop event raised when the engine stopped itself.
    pub fn take_cycle_stop(&mut self) -> bool {
        core::mem::take(&mut self.cycle_stop)
    }

    // ========================================================================
    // Real-time callbacks
    // ========================================================================

    /// Step pulse falling edge: return the step lines to their idle level.
    pub fn on_pulse_reset(&mut self) {
        let idle = self.settings.invert_mask.step_lines();
        if let Err(e) = self.port.write_step_lines(idle) {
            self.fault(e);
        }
    }

    /// One period of the real-time tick.
    pub fn tick(&mut self) {
        if self.runtime.busy {
            return;
        }

        // Direction lines were staged one tick ahead of any step edge
        if self.runtime.execute_step {
            self.runtime.execute_step = false;
            if let Err(e) = self.port.write_output(self.runtime.out_bits) {
                self.fault(e);
                return;
            }
            self.port.arm_pulse_reset(self.settings.pulse_width_us.0);
        }

        self.runtime.busy = true;

        let period = self.settings.ticks_per_acceleration_tick();
        let mut block_loaded = false;

        if self.runtime.load != LoadState::Noop {
            if self.run_state == RunState::Hold {
                self.port.stop_ticks();
                self.runtime.busy = false;
                self.cycle_stop = true;
                debug!("hold complete");
                return;
            }

            let Some(segment) = self.segments.peek().copied() else {
                self.finish_cycle();
                return;
            };

            self.runtime.segment = segment;
            self.runtime.segment_steps_remaining = segment.step_count;

            if self.runtime.load == LoadState::Block {
                let active = match self.planner.current_block() {
                    Some(block) => ActiveBlock::from(block),
                    None => {
                        warn!("segment queued without a planner block");
                        self.enter_alarm();
                        return;
                    }
                };

                let data = self.segment_data.get(segment.data_index);
                let seed = i64::from(active.step_event_count >> 1);

                self.runtime.block = active;
                self.runtime.out_bits = active.direction_bits ^ self.settings.invert_mask;
                self.runtime.execute_step = true;
                self.runtime.counters = [seed; N_AXIS];
                self.runtime.counter_d = i64::from(data.next_step_distance);
                self.runtime.ramp.start_block(data.initial_rate, period);
                block_loaded = true;
            }

            if segment.flag.is_decel() {
                self.runtime.ramp.begin_deceleration(period);
            }
            self.runtime.load = LoadState::Noop;
        }

        let data = *self.segment_data.get(self.runtime.segment.data_index);
        self.runtime
            .ramp
            .update(data.nominal_rate, data.rate_delta, period);

        let rate = self.runtime.ramp.rate_per_tick(self.settings.minimum_step_rate);
        self.runtime.counter_d -= i64::from(rate);

        // The first step event of a block waits for its direction tick
        if self.runtime.counter_d < 0 && !block_loaded {
            self.runtime.counter_d += i64::from(data.next_step_distance);
            self.step_event();
        }

        self.runtime.busy = false;
    }

    fn step_event(&mut self) {
        let block = self.runtime.block;
        let mut out_bits = block.direction_bits;

        for axis in Axis::ALL {
            let i = axis.index();
            self.runtime.counters[i] -= i64::from(block.steps[i]);
            if self.runtime.counters[i] < 0 {
                out_bits |= PortBits::step(axis);
                self.runtime.counters[i] += i64::from(block.step_event_count);
                let negative = block.direction_bits.contains(PortBits::direction(axis));
                self.position.step(axis, negative);
            }
        }

        self.runtime.segment_steps_remaining =
            self.runtime.segment_steps_remaining.saturating_sub(1);
        if self.runtime.segment_steps_remaining == 0 {
            if self.runtime.segment.flag.is_end_of_block() {
                self.planner.discard_current_block();
                self.runtime.load = LoadState::Block;
            } else {
                self.runtime.load = LoadState::Line;
            }
            self.segments.advance_tail();
        }

        self.runtime.out_bits = out_bits ^ self.settings.invert_mask;
        self.runtime.execute_step = true;
    }

    /// Ring drained: idle the engine and report the end of the cycle.
    fn finish_cycle(&mut self) {
        match self.go_idle() {
            Ok(()) => {}
            Err(Error::Port(e)) => {
                self.fault(e);
                return;
            }
            Err(_) => {
                self.enter_alarm();
                return;
            }
        }
        if self.run_state == RunState::Cycle {
            self.run_state = RunState::Idle;
        }
        self.cycle_stop = true;
        debug!("cycle stop");
    }

    /// Escalate a port fault from a real-time callback.
    fn fault(&mut self, error: PortError) {
        warn!("stepper fault: {}", error);
        self.enter_alarm();
    }

    /// Stop everything from the real-time context and enter [`RunState::Alarm`].
    fn enter_alarm(&mut self) {
        self.run_state = RunState::Alarm;
        self.port.stop_ticks();
        if let Err(e) = self
            .port
            .write_disable_line(!self.settings.disable_line_when_enabled())
        {
            warn!("drivers left enabled in alarm: {}", e);
        }
        self.runtime.busy = false;
        self.cycle_stop = true;
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Current run state.
    #[inline]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Machine position.
    #[inline]
    pub fn position(&self) -> &MachinePosition {
        &self.position
    }

    /// Overwrite the position of one axis, e.g. after homing.
    pub fn set_position(&mut self, axis: Axis, steps: Steps) {
        self.position.set(axis, steps);
    }

    /// Phase of the velocity ramp.
    #[inline]
    pub fn ramp_state(&self) -> RampState {
        self.runtime.ramp.state()
    }

    /// Rate the inverse-time counter currently runs at.
    #[inline]
    pub fn rate_per_tick(&self) -> u32 {
        self.runtime.ramp.rate_per_tick(self.settings.minimum_step_rate)
    }

    /// Step events left in the executing segment.
    #[inline]
    pub fn segment_steps_remaining(&self) -> u32 {
        self.runtime.segment_steps_remaining
    }

    /// Segments waiting in the ring, including the executing one.
    #[inline]
    pub fn segments_queued(&self) -> usize {
        self.segments.len()
    }

    /// True while a tick is executing.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.runtime.busy
    }

    /// Engine settings.
    #[inline]
    pub fn settings(&self) -> &StepperSettings {
        &self.settings
    }

    /// The planner.
    #[inline]
    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// The planner, e.g. to queue more blocks.
    #[inline]
    pub fn planner_mut(&mut self) -> &mut P {
        &mut self.planner
    }

    /// The hardware port.
    #[inline]
    pub fn port(&self) -> &H {
        &self.port
    }

    /// The hardware port, e.g. to acknowledge timer interrupts.
    #[inline]
    pub fn port_mut(&mut self) -> &mut H {
        &mut self.port
    }

    /// Take the engine apart.
    pub fn release(self) -> (P, H, D) {
        (self.planner, self.port, self.delay)
    }
}
