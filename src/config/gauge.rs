//! Gauge configuration from TOML.

use heapless::{String, Vec};
use serde::Deserialize;

use crate::driver::{
    DEFAULT_PULSE_WIDTH, DEFAULT_RESET_HOLD, DEFAULT_STARTUP_PERIOD, DEFAULT_TOTAL_STEPS,
    DEFAULT_ZERO_STEP_DELAY,
};
use crate::error::Result;
use crate::motion::{AccelStep, AccelerationProfile, MAX_PROFILE_ENTRIES, X12_PROFILE};

use super::units::{Microseconds, Milliseconds};

/// Complete gauge configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GaugeConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Number of addressable steps (315° × 12 for X27-style movements).
    #[serde(default = "default_total_steps")]
    pub total_steps: u32,

    /// Tick period before a move picks its first velocity.
    #[serde(default = "default_startup_period", rename = "startup_period_us")]
    pub startup_period: Microseconds,

    /// Delay between steps while zeroing.
    #[serde(default = "default_zero_step_delay", rename = "zero_step_delay_us")]
    pub zero_step_delay: Microseconds,

    /// Step pulse hold time.
    #[serde(default = "default_pulse_width", rename = "pulse_width_us")]
    pub pulse_width: Microseconds,

    /// Reset line low time.
    #[serde(default = "default_reset_hold", rename = "reset_hold_ms")]
    pub reset_hold: Milliseconds,

    /// Declared maximum velocity. Defaults to the last acceleration ceiling.
    #[serde(default)]
    pub max_velocity: Option<u32>,

    /// Acceleration table. Defaults to the X12 curve.
    #[serde(default = "default_acceleration")]
    pub acceleration: Vec<AccelStep, MAX_PROFILE_ENTRIES>,
}

fn default_total_steps() -> u32 {
    DEFAULT_TOTAL_STEPS
}

fn default_startup_period() -> Microseconds {
    DEFAULT_STARTUP_PERIOD
}

fn default_zero_step_delay() -> Microseconds {
    DEFAULT_ZERO_STEP_DELAY
}

fn default_pulse_width() -> Microseconds {
    DEFAULT_PULSE_WIDTH
}

fn default_reset_hold() -> Milliseconds {
    DEFAULT_RESET_HOLD
}

fn default_acceleration() -> Vec<AccelStep, MAX_PROFILE_ENTRIES> {
    X12_PROFILE.iter().copied().collect()
}

impl GaugeConfig {
    /// Build and validate the acceleration profile.
    pub fn profile(&self) -> Result<AccelerationProfile> {
        match self.max_velocity {
            Some(max) => AccelerationProfile::new(&self.acceleration, max),
            None => AccelerationProfile::from_entries(&self.acceleration),
        }
    }
}
