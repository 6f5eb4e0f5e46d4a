//! Unit tests for configuration validation.

use gauge_stepper::config::{parse_config, validate_config, SystemConfig};
use gauge_stepper::{ConfigError, Error};

fn parse_unvalidated(toml_str: &str) -> SystemConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test that a valid configuration passes.
#[test]
fn test_valid_config() {
    let config = parse_unvalidated(
        r#"
[gauges.frequency]
name = "Grid frequency"

[mappers.grid]
gauge = "frequency"
range_min = 49.8
range_max = 50.2
step_min = 3250
step_max = 3500
"#,
    );

    assert!(validate_config(&config).is_ok());
}

/// Test that an empty acceleration table is rejected.
#[test]
fn test_empty_profile() {
    let config = parse_unvalidated(
        r#"
[gauges.g]
name = "g"
acceleration = []
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::EmptyProfile))
    ));
}

/// Test that repeated velocity ceilings are rejected.
#[test]
fn test_non_increasing_profile() {
    let config = parse_unvalidated(
        r#"
[gauges.g]
name = "g"
acceleration = [
    { velocity = 20, period_us = 4000 },
    { velocity = 20, period_us = 2000 },
    { velocity = 100, period_us = 1000 },
]
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::ProfileNotIncreasing {
            index: 1,
            previous: 20,
            ceiling: 20
        }))
    ));
}

/// Test that a table not reaching the declared max is rejected.
#[test]
fn test_profile_below_max_velocity() {
    let config = parse_unvalidated(
        r#"
[gauges.g]
name = "g"
max_velocity = 300
acceleration = [
    { velocity = 20, period_us = 4000 },
    { velocity = 250, period_us = 450 },
]
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::ProfileMaxMismatch {
            last: 250,
            max_velocity: 300
        }))
    ));
}

/// Test that a zero tick period is rejected.
#[test]
fn test_zero_period() {
    let config = parse_unvalidated(
        r#"
[gauges.g]
name = "g"
acceleration = [
    { velocity = 20, period_us = 4000 },
    { velocity = 40, period_us = 0 },
]
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::ZeroPeriod(1)))
    ));
}

/// Test that a gauge with no steps is rejected.
#[test]
fn test_zero_total_steps() {
    let result = parse_config(
        r#"
[gauges.g]
name = "g"
total_steps = 0
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ZeroTotalSteps))
    ));
}

/// Test that a mapper must reference an existing gauge.
#[test]
fn test_mapper_unknown_gauge() {
    let config = parse_unvalidated(
        r#"
[gauges.frequency]
name = "Grid frequency"

[mappers.grid]
gauge = "voltage"
range_min = 0.0
range_max = 1.0
step_min = 0
step_max = 10
"#,
    );

    match validate_config(&config) {
        Err(Error::Config(ConfigError::MapperGaugeNotFound { mapper, gauge })) => {
            assert_eq!(mapper.as_str(), "grid");
            assert_eq!(gauge.as_str(), "voltage");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Test that an inverted input range is rejected.
#[test]
fn test_mapper_inverted_range() {
    let config = parse_unvalidated(
        r#"
[gauges.frequency]
name = "Grid frequency"

[mappers.grid]
gauge = "frequency"
range_min = 50.2
range_max = 49.8
step_min = 3250
step_max = 3500
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMapperRange { .. }))
    ));
}

/// Test that a step window must fit inside the gauge.
#[test]
fn test_mapper_steps_beyond_gauge() {
    let config = parse_unvalidated(
        r#"
[gauges.frequency]
name = "Grid frequency"
total_steps = 3000

[mappers.grid]
gauge = "frequency"
range_min = 49.8
range_max = 50.2
step_min = 2500
step_max = 3000
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMapperSteps {
            min: 2500,
            max: 3000,
            total_steps: 3000
        }))
    ));
}
