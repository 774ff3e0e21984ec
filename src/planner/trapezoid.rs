//! Trapezoid breakpoint calculation.
//!
//! Finds where a block must start decelerating so that it leaves at the
//! requested exit speed, under constant acceleration `a`:
//!
//! ```text
//!   v² = entry² + 2·a·d          (accelerating, d from block start)
//!   v² = exit²  + 2·a·(L - d)    (decelerating into the block end)
//! ```
//!
//! If both ramps fit, deceleration starts `(nominal² - exit²) / 2a` before the
//! end. Otherwise the profile is a triangle and deceleration starts where the
//! two parabolas intersect.

use libm::floorf;

use super::block::PlannerBlock;

/// Step count from the start of `block` after which deceleration must begin.
///
/// Returns 0 when the block must decelerate from its first step and
/// `step_event_count` when it never decelerates.
pub fn decelerate_after(block: &PlannerBlock, exit_speed_sqr: f32) -> u32 {
    let step_events = block.step_event_count;
    let length = block.millimeters;
    let accel = block.acceleration;

    if step_events == 0 || length <= 0.0 || accel <= 0.0 {
        return step_events;
    }

    let nominal_sqr = block.nominal_speed_sqr;
    let entry_sqr = block.entry_speed_sqr.min(nominal_sqr);
    let exit_sqr = exit_speed_sqr.clamp(0.0, nominal_sqr);

    let accelerate_mm = (nominal_sqr - entry_sqr) / (2.0 * accel);
    let decelerate_mm = (nominal_sqr - exit_sqr) / (2.0 * accel);

    let decel_start_mm = if accelerate_mm + decelerate_mm <= length {
        length - decelerate_mm
    } else {
        (exit_sqr - entry_sqr + 2.0 * accel * length) / (4.0 * accel)
    };

    let steps_per_mm = step_events as f32 / length;
    let breakpoint = floorf(decel_start_mm.clamp(0.0, length) * steps_per_mm);
    if breakpoint <= 0.0 {
        0
    } else {
        (breakpoint as u32).min(step_events)
    }
}
