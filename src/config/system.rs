//! System configuration - root configuration structure.

use serde::Deserialize;

use super::settings::StepperSettings;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemConfig {
    /// Engine settings from the `[stepper]` table.
    #[serde(default)]
    pub stepper: StepperSettings,
}

impl SystemConfig {
    /// Get the engine settings.
    pub fn stepper(&self) -> &StepperSettings {
        &self.stepper
    }
}
