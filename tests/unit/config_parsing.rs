//! Unit tests for TOML configuration parsing.

use gauge_stepper::config::{load_config, parse_config, SystemConfig};
use gauge_stepper::{AccelStep, Microseconds, Milliseconds, X12_PROFILE};

/// Test parsing a gauge with every field given.
#[test]
fn test_parse_gauge_config() {
    let toml_str = r#"
[gauges.boost]
name = "Boost pressure"
total_steps = 945
startup_period_us = 800
zero_step_delay_us = 600
pulse_width_us = 2
reset_hold_ms = 5
max_velocity = 120
acceleration = [
    { velocity = 30, period_us = 3000 },
    { velocity = 80, period_us = 1200 },
    { velocity = 120, period_us = 700 },
]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let gauge = config.gauge("boost").expect("Gauge not found");

    assert_eq!(gauge.name.as_str(), "Boost pressure");
    assert_eq!(gauge.total_steps, 945);
    assert_eq!(gauge.startup_period, Microseconds(800));
    assert_eq!(gauge.zero_step_delay, Microseconds(600));
    assert_eq!(gauge.pulse_width, Microseconds(2));
    assert_eq!(gauge.reset_hold, Milliseconds(5));
    assert_eq!(gauge.max_velocity, Some(120));
    assert_eq!(gauge.acceleration[1], AccelStep::new(80, 1200));

    let profile = gauge.profile().expect("valid profile");
    assert_eq!(profile.max_velocity(), 120);
    assert_eq!(profile.lookup_period(81), Microseconds(700));
}

/// Test that omitted fields fall back to the X12 defaults.
#[test]
fn test_parse_gauge_defaults() {
    let toml_str = r#"
[gauges.frequency]
name = "Grid frequency"
"#;

    let config = parse_config(toml_str).expect("Failed to parse");
    let gauge = config.gauge("frequency").unwrap();

    assert_eq!(gauge.total_steps, 315 * 12);
    assert_eq!(gauge.startup_period, Microseconds(500));
    assert_eq!(gauge.zero_step_delay, Microseconds(300));
    assert_eq!(gauge.pulse_width, Microseconds(1));
    assert_eq!(gauge.reset_hold, Milliseconds(1));
    assert_eq!(gauge.max_velocity, None);
    assert_eq!(gauge.acceleration.as_slice(), &X12_PROFILE[..]);
}

/// Test parsing mappers and looking them up by gauge.
#[test]
fn test_parse_mappers() {
    let toml_str = r#"
[gauges.frequency]
name = "Grid frequency"

[gauges.voltage]
name = "Grid voltage"
total_steps = 1000

[mappers.grid]
gauge = "frequency"
range_min = 49.8
range_max = 50.2
step_min = 3250
step_max = 3500

[mappers.mains]
gauge = "voltage"
range_min = 200.0
range_max = 260.0
step_min = 0
step_max = 999
"#;

    let config = parse_config(toml_str).expect("Failed to parse");

    let names: Vec<&str> = config.gauge_names().collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"frequency"));

    let grid = config.mapper("grid").unwrap();
    assert_eq!(grid.gauge.as_str(), "frequency");
    assert!((grid.range_min - 49.8).abs() < 1e-4);
    assert_eq!(grid.step_max, 3500);

    let for_voltage: Vec<&str> = config
        .mappers_for_gauge("voltage")
        .map(|(name, _)| name)
        .collect();
    assert_eq!(for_voltage, ["mains"]);
    assert_eq!(config.mapper_names().count(), 2);
}

/// Test that a gauge without a name is rejected.
#[test]
fn test_missing_name_fails() {
    let toml_str = r#"
[gauges.frequency]
total_steps = 100
"#;

    assert!(parse_config(toml_str).is_err());
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("gauge_stepper_load_config.toml");
    std::fs::write(
        &path,
        "[gauges.speed]\nname = \"Speed\"\ntotal_steps = 600\n",
    )
    .unwrap();

    let config = load_config(&path).expect("Failed to load");
    assert_eq!(config.gauge("speed").unwrap().total_steps, 600);

    let _ = std::fs::remove_file(&path);
}
