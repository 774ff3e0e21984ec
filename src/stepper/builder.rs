//! Builder pattern for Stepper.

use embedded_hal::delay::DelayNs;

use crate::config::{validate_settings, StepperSettings, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::planner::Planner;
use crate::segment::{FixedSegmentSize, SegmentSizing};

use super::engine::Stepper;
use super::port::StepperPort;

/// Builder for creating [`Stepper`] instances.
pub struct StepperBuilder<P, H, D, S = FixedSegmentSize>
where
    P: Planner,
    H: StepperPort,
    D: DelayNs,
    S: SegmentSizing,
{
    planner: Option<P>,
    port: Option<H>,
    delay: Option<D>,
    settings: StepperSettings,
    sizing: S,
}

impl<P, H, D> Default for StepperBuilder<P, H, D, FixedSegmentSize>
where
    P: Planner,
    H: StepperPort,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, H, D> StepperBuilder<P, H, D, FixedSegmentSize>
where
    P: Planner,
    H: StepperPort,
    D: DelayNs,
{
    /// Create a new builder with default settings and fixed-size segments.
    pub fn new() -> Self {
        Self {
            planner: None,
            port: None,
            delay: None,
            settings: StepperSettings::default(),
            sizing: FixedSegmentSize,
        }
    }
}

impl<P, H, D, S> StepperBuilder<P, H, D, S>
where
    P: Planner,
    H: StepperPort,
    D: DelayNs,
    S: SegmentSizing,
{
    /// Set the planner.
    pub fn planner(mut self, planner: P) -> Self {
        self.planner = Some(planner);
        self
    }

    /// Set the hardware port.
    pub fn port(mut self, port: H) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the engine settings.
    pub fn settings(mut self, settings: StepperSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Configure from a SystemConfig.
    pub fn from_config(self, config: &SystemConfig) -> Self {
        self.settings(config.stepper().clone())
    }

    /// Replace the segment sizing policy.
    pub fn segment_sizing<S2: SegmentSizing>(self, sizing: S2) -> StepperBuilder<P, H, D, S2> {
        StepperBuilder {
            planner: self.planner,
            port: self.port,
            delay: self.delay,
            settings: self.settings,
            sizing,
        }
    }

    /// Build the Stepper.
    ///
    /// The engine starts reset and in [`RunState::Idle`](super::RunState::Idle);
    /// call [`Stepper::init`] before the first cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if a component is missing or the settings are invalid.
    pub fn build(self) -> Result<Stepper<P, H, D, S>> {
        let planner = self
            .planner
            .ok_or(Error::Config(ConfigError::MissingComponent("planner")))?;

        let port = self
            .port
            .ok_or(Error::Config(ConfigError::MissingComponent("port")))?;

        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingComponent("delay")))?;

        validate_settings(&self.settings)?;

        Ok(Stepper::new(planner, port, delay, self.settings, self.sizing))
    }
}
