//! Builder pattern for StepperDriver.

use crate::config::units::Microseconds;
use crate::config::{GaugeConfig, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::AccelerationProfile;

use super::driver::{
    StepperDriver, DEFAULT_STARTUP_PERIOD, DEFAULT_TOTAL_STEPS, DEFAULT_ZERO_STEP_DELAY,
};
use super::emitter::PulseEmitter;
use super::timer::PeriodicTimer;

/// Builder for creating StepperDriver instances.
pub struct GaugeBuilder<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    emitter: Option<E>,
    timer: Option<T>,
    profile: Option<&'a AccelerationProfile>,
    total_steps: u32,
    startup_period: Microseconds,
    zero_step_delay: Microseconds,
}

impl<'a, E, T> Default for GaugeBuilder<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E, T> GaugeBuilder<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    /// Create a new builder with X12 defaults.
    pub fn new() -> Self {
        Self {
            emitter: None,
            timer: None,
            profile: None,
            total_steps: DEFAULT_TOTAL_STEPS,
            startup_period: DEFAULT_STARTUP_PERIOD,
            zero_step_delay: DEFAULT_ZERO_STEP_DELAY,
        }
    }

    /// Set the pulse emitter.
    pub fn emitter(mut self, emitter: E) -> Self {
        self.emitter = Some(emitter);
        self
    }

    /// Set the periodic timer.
    pub fn timer(mut self, timer: T) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the acceleration profile.
    pub fn profile(mut self, profile: &'a AccelerationProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set the number of addressable steps.
    pub fn total_steps(mut self, steps: u32) -> Self {
        self.total_steps = steps;
        self
    }

    /// Set the tick period used before a move picks its first velocity.
    pub fn startup_period(mut self, period: Microseconds) -> Self {
        self.startup_period = period;
        self
    }

    /// Set the delay between steps of a blocking walk.
    pub fn zero_step_delay(mut self, delay: Microseconds) -> Self {
        self.zero_step_delay = delay;
        self
    }

    /// Configure from a GaugeConfig.
    ///
    /// The profile is not taken from the config: the driver borrows it, so
    /// build it with [`GaugeConfig::profile`] and pass it to
    /// [`profile`](Self::profile).
    pub fn from_gauge_config(mut self, config: &GaugeConfig) -> Self {
        self.total_steps = config.total_steps;
        self.startup_period = config.startup_period;
        self.zero_step_delay = config.zero_step_delay;
        self
    }

    /// Configure from SystemConfig by gauge name.
    pub fn from_config(self, config: &SystemConfig, gauge_name: &str) -> Result<Self> {
        let gauge_config = config.gauge(gauge_name).ok_or_else(|| {
            Error::Config(ConfigError::GaugeNotFound(
                heapless::String::try_from(gauge_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_gauge_config(gauge_config))
    }

    /// Build the StepperDriver, resetting the chip and arming the timer.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing, `total_steps` is zero
    /// or the reset pulse fails.
    pub fn build(self) -> Result<StepperDriver<'a, E, T>> {
        let emitter = self.emitter.ok_or(ConfigError::MissingField("emitter"))?;
        let timer = self.timer.ok_or(ConfigError::MissingField("timer"))?;
        let profile = self.profile.ok_or(ConfigError::MissingField("profile"))?;

        StepperDriver::begin(
            emitter,
            timer,
            self.total_steps,
            profile,
            self.startup_period,
            self.zero_step_delay,
        )
    }
}
