//! Linear mapping from an external measurement onto gauge steps.
//!
//! A [`PositionMapper`] turns a reading (a grid frequency, a temperature, ...)
//! into an absolute step and forwards it to anything implementing
//! [`PositionSink`]. Repeated readings are not forwarded twice.

use crate::config::MapperConfig;
use crate::driver::{PeriodicTimer, PulseEmitter, SharedGauge, StepperDriver};
use crate::error::{ConfigError, Error, Result};

/// Receiver of absolute step commands.
pub trait PositionSink {
    /// Command a move to `step`.
    fn set_position(&mut self, step: u32);
}

impl<'a, E, T> PositionSink for StepperDriver<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    fn set_position(&mut self, step: u32) {
        self.set_target_position(step);
    }
}

impl<'a, E, T> PositionSink for &SharedGauge<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    fn set_position(&mut self, step: u32) {
        SharedGauge::set_position(*self, step);
    }
}

/// Maps `[range_min, range_max]` linearly onto `[step_min, step_max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionMapper {
    range_min: f32,
    range_max: f32,
    step_min: u32,
    step_max: u32,
    last: Option<f32>,
}

impl PositionMapper {
    /// Create a mapper.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMapperRange`] unless `range_min < range_max`,
    /// and [`ConfigError::InvertedMapperSteps`] if `step_min > step_max`.
    pub fn new(range_min: f32, range_max: f32, step_min: u32, step_max: u32) -> Result<Self> {
        if range_min.is_nan() || range_max.is_nan() || range_min >= range_max {
            return Err(Error::Config(ConfigError::InvalidMapperRange {
                min: range_min,
                max: range_max,
            }));
        }

        if step_min > step_max {
            return Err(Error::Config(ConfigError::InvertedMapperSteps {
                min: step_min,
                max: step_max,
            }));
        }

        Ok(Self {
            range_min,
            range_max,
            step_min,
            step_max,
            last: None,
        })
    }

    /// Create a mapper from its TOML configuration.
    pub fn from_config(config: &MapperConfig) -> Result<Self> {
        Self::new(
            config.range_min,
            config.range_max,
            config.step_min,
            config.step_max,
        )
    }

    /// Step for `value`, rounded to nearest and clamped to the step window.
    ///
    /// Returns `None` for NaN.
    pub fn map(&self, value: f32) -> Option<u32> {
        if value.is_nan() {
            return None;
        }

        let span = (self.step_max - self.step_min) as f32;
        let scaled = (value - self.range_min) * span / (self.range_max - self.range_min);
        let step = libm::roundf(scaled + self.step_min as f32)
            .clamp(self.step_min as f32, self.step_max as f32);

        Some(step as u32)
    }

    /// Map `value` and forward it to `sink` if it differs from the last
    /// applied value.
    ///
    /// Returns the forwarded step, or `None` when nothing was sent.
    pub fn apply<S: PositionSink>(&mut self, value: f32, sink: &mut S) -> Option<u32> {
        if self.last == Some(value) {
            return None;
        }

        let step = self.map(value)?;
        self.last = Some(value);
        trace!("mapped reading to step {}", step);
        sink.set_position(step);
        Some(step)
    }

    /// Last value forwarded by [`apply`](Self::apply).
    pub fn last_value(&self) -> Option<f32> {
        self.last
    }

    /// Forget the last applied value so the next reading is always forwarded.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        commands: std::vec::Vec<u32>,
    }

    impl PositionSink for Recorder {
        fn set_position(&mut self, step: u32) {
            self.commands.push(step);
        }
    }

    fn grid() -> PositionMapper {
        PositionMapper::new(49.8, 50.2, 3250, 3500).unwrap()
    }

    #[test]
    fn test_map_endpoints_and_midpoint() {
        let mapper = grid();
        assert_eq!(mapper.map(49.8), Some(3250));
        assert_eq!(mapper.map(50.0), Some(3375));
        assert_eq!(mapper.map(50.2), Some(3500));
    }

    #[test]
    fn test_map_clamps_outside_range() {
        let mapper = grid();
        assert_eq!(mapper.map(40.0), Some(3250));
        assert_eq!(mapper.map(60.0), Some(3500));
        assert_eq!(mapper.map(f32::INFINITY), Some(3500));
        assert_eq!(mapper.map(f32::NEG_INFINITY), Some(3250));
    }

    #[test]
    fn test_map_rounds_to_nearest() {
        let mapper = PositionMapper::new(0.0, 10.0, 0, 4).unwrap();
        // 0.4 steps per unit
        assert_eq!(mapper.map(1.0), Some(0));
        assert_eq!(mapper.map(2.0), Some(1));
        assert_eq!(mapper.map(6.0), Some(2));
    }

    #[test]
    fn test_nan_is_ignored() {
        let mut mapper = grid();
        let mut sink = Recorder::default();

        assert_eq!(mapper.map(f32::NAN), None);
        assert_eq!(mapper.apply(f32::NAN, &mut sink), None);
        assert!(sink.commands.is_empty());
        assert_eq!(mapper.last_value(), None);
    }

    #[test]
    fn test_apply_skips_repeated_value() {
        let mut mapper = grid();
        let mut sink = Recorder::default();

        assert_eq!(mapper.apply(50.0, &mut sink), Some(3375));
        assert_eq!(mapper.apply(50.0, &mut sink), None);
        assert_eq!(mapper.apply(49.8, &mut sink), Some(3250));

        mapper.reset();
        assert_eq!(mapper.apply(49.8, &mut sink), Some(3250));

        assert_eq!(sink.commands, [3375, 3250, 3250]);
    }

    #[test]
    fn test_first_reading_is_forwarded() {
        let mut mapper = PositionMapper::new(0.0, 1.0, 0, 100).unwrap();
        let mut sink = Recorder::default();

        // A zero reading still goes out even though nothing was applied yet.
        assert_eq!(mapper.apply(0.0, &mut sink), Some(0));
        assert_eq!(sink.commands, [0]);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!(matches!(
            PositionMapper::new(1.0, 1.0, 0, 10),
            Err(Error::Config(ConfigError::InvalidMapperRange { .. }))
        ));
        assert!(matches!(
            PositionMapper::new(f32::NAN, 1.0, 0, 10),
            Err(Error::Config(ConfigError::InvalidMapperRange { .. }))
        ));
        assert!(matches!(
            PositionMapper::new(0.0, 1.0, 10, 0),
            Err(Error::Config(ConfigError::InvertedMapperSteps { min: 10, max: 0 }))
        ));
    }
}
