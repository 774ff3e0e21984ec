//! Trapezoidal velocity ramp of the execution engine.

use core::fmt;

/// Phase of the velocity profile of the executing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampState {
    /// Rate rises by `rate_delta` per acceleration tick.
    Accel,
    /// Rate holds at the nominal rate.
    #[default]
    Cruise,
    /// Rate falls by `rate_delta` per acceleration tick.
    Decel,
}

impl fmt::Display for RampState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RampState::Accel => write!(f, "accel"),
            RampState::Cruise => write!(f, "cruise"),
            RampState::Decel => write!(f, "decel"),
        }
    }
}

/// Ramp sub-machine: current phase, countdown to the next rate change, and
/// the unfloored step rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ramp {
    state: RampState,
    count: u32,
    rate: u32,
}

impl Ramp {
    /// Current phase.
    #[inline]
    pub fn state(&self) -> RampState {
        self.state
    }

    /// Ticks left until the next rate change.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Rate before the minimum floor is applied.
    #[inline]
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Rate the inverse-time counter is decremented by each tick.
    #[inline]
    pub fn rate_per_tick(&self, minimum_rate: u32) -> u32 {
        self.rate.max(minimum_rate)
    }

    /// Enter a new block: accelerate from `initial_rate`, first change half a
    /// period from now.
    pub fn start_block(&mut self, initial_rate: u32, period: u32) {
        self.rate = initial_rate;
        self.state = RampState::Accel;
        self.count = period / 2;
    }

    /// Switch to deceleration.
    ///
    /// From cruise the countdown restarts at half a period. From acceleration
    /// it is mirrored around the peak so a triangle profile stays symmetric.
    pub fn begin_deceleration(&mut self, period: u32) {
        match self.state {
            RampState::Cruise => self.count = period / 2,
            RampState::Accel => self.count = period.saturating_sub(self.count).max(1),
            RampState::Decel => {}
        }
        self.state = RampState::Decel;
    }

    /// Advance the ramp by one tick.
    pub fn update(&mut self, nominal_rate: u32, rate_delta: u32, period: u32) {
        if self.state == RampState::Cruise {
            return;
        }

        self.count = self.count.saturating_sub(1);
        if self.count > 0 {
            return;
        }
        self.count = period;

        match self.state {
            RampState::Accel => {
                self.rate = self.rate.saturating_add(rate_delta);
                if self.rate >= nominal_rate {
                    self.rate = nominal_rate;
                    self.state = RampState::Cruise;
                }
            }
            RampState::Decel => {
                if self.rate > rate_delta {
                    self.rate -= rate_delta;
                } else {
                    // Near standstill: halve instead of wrapping below zero
                    self.rate >>= 1;
                }
            }
            RampState::Cruise => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: u32 = 200;

    #[test]
    fn test_accel_clamps_to_nominal() {
        let mut ramp = Ramp::default();
        ramp.start_block(0, PERIOD);
        assert_eq!(ramp.state(), RampState::Accel);
        assert_eq!(ramp.count(), 100);

        // First change lands after half a period
        for _ in 0..99 {
            ramp.update(1200, 500, PERIOD);
        }
        assert_eq!(ramp.rate(), 0);
        ramp.update(1200, 500, PERIOD);
        assert_eq!(ramp.rate(), 500);

        for _ in 0..PERIOD {
            ramp.update(1200, 500, PERIOD);
        }
        assert_eq!(ramp.rate(), 1000);

        for _ in 0..PERIOD {
            ramp.update(1200, 500, PERIOD);
        }
        assert_eq!(ramp.rate(), 1200);
        assert_eq!(ramp.state(), RampState::Cruise);
    }

    #[test]
    fn test_decel_halves_near_zero() {
        let mut ramp = Ramp::default();
        ramp.start_block(700, PERIOD);
        ramp.begin_deceleration(PERIOD);

        let mut rates = heapless::Vec::<u32, 8>::new();
        for _ in 0..(PERIOD * 5) {
            let before = ramp.rate();
            ramp.update(1000, 500, PERIOD);
            if ramp.rate() != before {
                rates.push(ramp.rate()).unwrap();
            }
        }

        assert_eq!(rates.as_slice(), &[200, 100, 50, 25, 12]);
        assert_eq!(ramp.rate_per_tick(30), 30);
    }

    #[test]
    fn test_triangle_mirrors_countdown() {
        let mut ramp = Ramp::default();
        ramp.start_block(0, PERIOD);
        for _ in 0..30 {
            ramp.update(10_000, 10, PERIOD);
        }
        assert_eq!(ramp.count(), 70);

        ramp.begin_deceleration(PERIOD);
        assert_eq!(ramp.state(), RampState::Decel);
        assert_eq!(ramp.count(), 130);

        // Already decelerating: countdown untouched
        ramp.begin_deceleration(PERIOD);
        assert_eq!(ramp.count(), 130);
    }

    #[test]
    fn test_cruise_to_decel_restarts_half_period() {
        let mut ramp = Ramp::default();
        ramp.start_block(900, PERIOD);
        for _ in 0..100 {
            ramp.update(1000, 500, PERIOD);
        }
        assert_eq!(ramp.state(), RampState::Cruise);

        ramp.begin_deceleration(PERIOD);
        assert_eq!(ramp.count(), 100);
    }

    #[test]
    fn test_mirrored_countdown_never_zero() {
        let mut ramp = Ramp::default();
        ramp.start_block(0, 1);
        ramp.begin_deceleration(1);
        assert_eq!(ramp.count(), 1);
    }
}
