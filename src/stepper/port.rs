//! Hardware sink of the execution engine.
//!
//! The engine only ever talks to a [`StepperPort`]: it writes the six step and
//! direction lines, the driver disable line, and controls the two timers. A
//! [`PinPort`] implements it on top of `embedded-hal` output pins.

use embedded_hal::digital::OutputPin;

use crate::axis::{Axis, PortBits, N_AXIS};
use crate::error::PortError;

/// Output lines and timers driven by the engine.
pub trait StepperPort {
    /// Drive every step and direction line to the levels in `bits`.
    ///
    /// Implementations settle direction lines no later than step lines.
    fn write_output(&mut self, bits: PortBits) -> Result<(), PortError>;

    /// Drive only the step lines to the levels in `bits`.
    fn write_step_lines(&mut self, bits: PortBits) -> Result<(), PortError>;

    /// Drive the driver disable line.
    fn write_disable_line(&mut self, high: bool) -> Result<(), PortError>;

    /// Schedule the pulse-reset callback `width_us` from now.
    fn arm_pulse_reset(&mut self, width_us: u32);

    /// Start the periodic tick source.
    fn start_ticks(&mut self);

    /// Stop the periodic tick source.
    fn stop_ticks(&mut self);
}

/// Periodic tick source plus the one-shot pulse-reset timer.
pub trait TickTimer {
    /// Start calling the engine tick at the configured frequency.
    fn start(&mut self);

    /// Stop the tick.
    fn stop(&mut self);

    /// Fire the pulse-reset callback once, `width_us` from now.
    fn arm_pulse_reset(&mut self, width_us: u32);
}

/// [`StepperPort`] over individual output pins.
///
/// Generic over:
/// - `STEP`: step pin type, one per axis
/// - `DIR`: direction pin type, one per axis
/// - `EN`: driver disable pin type
/// - `T`: tick and pulse-reset timers
pub struct PinPort<STEP, DIR, EN, T>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    T: TickTimer,
{
    step: [STEP; N_AXIS],
    dir: [DIR; N_AXIS],
    disable: EN,
    timer: T,
}

impl<STEP, DIR, EN, T> PinPort<STEP, DIR, EN, T>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    T: TickTimer,
{
    /// Create a port from X/Y/Z step pins, X/Y/Z direction pins, the disable
    /// pin and the timers.
    pub fn new(step: [STEP; N_AXIS], dir: [DIR; N_AXIS], disable: EN, timer: T) -> Self {
        Self {
            step,
            dir,
            disable,
            timer,
        }
    }

    /// Give the pins and timers back.
    pub fn release(self) -> ([STEP; N_AXIS], [DIR; N_AXIS], EN, T) {
        (self.step, self.dir, self.disable, self.timer)
    }
}

fn set_level<PIN: OutputPin>(pin: &mut PIN, high: bool) -> Result<(), PIN::Error> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

impl<STEP, DIR, EN, T> StepperPort for PinPort<STEP, DIR, EN, T>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    T: TickTimer,
{
    fn write_output(&mut self, bits: PortBits) -> Result<(), PortError> {
        for axis in Axis::ALL {
            let high = bits.contains(PortBits::direction(axis));
            set_level(&mut self.dir[axis.index()], high).map_err(|_| PortError::DirectionPin)?;
        }
        self.write_step_lines(bits)
    }

    fn write_step_lines(&mut self, bits: PortBits) -> Result<(), PortError> {
        for axis in Axis::ALL {
            let high = bits.contains(PortBits::step(axis));
            set_level(&mut self.step[axis.index()], high).map_err(|_| PortError::StepPin)?;
        }
        Ok(())
    }

    fn write_disable_line(&mut self, high: bool) -> Result<(), PortError> {
        set_level(&mut self.disable, high).map_err(|_| PortError::DisablePin)
    }

    #[inline]
    fn arm_pulse_reset(&mut self, width_us: u32) {
        self.timer.arm_pulse_reset(width_us);
    }

    #[inline]
    fn start_ticks(&mut self) {
        self.timer.start();
    }

    #[inline]
    fn stop_ticks(&mut self) {
        self.timer.stop();
    }
}
