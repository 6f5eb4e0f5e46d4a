//! Position mapper configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// Linear mapping from an external measurement onto a gauge's steps.
#[derive(Debug, Clone, Deserialize)]
pub struct MapperConfig {
    /// Target gauge name (must match a gauge in config).
    pub gauge: String<32>,

    /// Measurement mapped to `step_min`.
    pub range_min: f32,

    /// Measurement mapped to `step_max`.
    pub range_max: f32,

    /// Lowest step the mapper commands.
    pub step_min: u32,

    /// Highest step the mapper commands.
    pub step_max: u32,
}

impl MapperConfig {
    /// Check the input range is non-empty and not inverted.
    pub fn range_is_valid(&self) -> bool {
        self.range_min < self.range_max
    }

    /// Check the step window is ordered and fits a gauge of `total_steps`.
    pub fn steps_fit(&self, total_steps: u32) -> bool {
        self.step_min <= self.step_max && self.step_max < total_steps
    }
}
