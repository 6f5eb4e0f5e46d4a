//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{GaugeConfig, MapperConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Every gauge has at least one step and a valid acceleration profile
/// - Mappers reference existing gauges
/// - Mapper input ranges are non-empty (min < max)
/// - Mapper step windows are ordered and inside the gauge
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, gauge) in config.gauges.iter() {
        validate_gauge(gauge)?;
    }

    for (name, mapper) in config.mappers.iter() {
        validate_mapper(name.as_str(), mapper, config)?;
    }

    Ok(())
}

fn validate_gauge(gauge: &GaugeConfig) -> Result<()> {
    if gauge.total_steps == 0 {
        return Err(Error::Config(ConfigError::ZeroTotalSteps));
    }

    gauge.profile()?;

    Ok(())
}

fn validate_mapper(name: &str, mapper: &MapperConfig, config: &SystemConfig) -> Result<()> {
    let gauge = config.gauge(mapper.gauge.as_str()).ok_or_else(|| {
        Error::Config(ConfigError::MapperGaugeNotFound {
            mapper: heapless::String::try_from(name).unwrap_or_default(),
            gauge: mapper.gauge.clone(),
        })
    })?;

    if !mapper.range_is_valid() {
        return Err(Error::Config(ConfigError::InvalidMapperRange {
            min: mapper.range_min,
            max: mapper.range_max,
        }));
    }

    if !mapper.steps_fit(gauge.total_steps) {
        return Err(Error::Config(ConfigError::InvalidMapperSteps {
            min: mapper.step_min,
            max: mapper.step_max,
            total_steps: gauge.total_steps,
        }));
    }

    Ok(())
}
