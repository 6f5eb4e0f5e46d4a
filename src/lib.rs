//! # gauge-stepper
//!
//! Timer-driven stepper driver for analog gauge needles (X27/X12 class
//! movements) with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Tick-driven**: one step per timer tick, never blocks in the tick
//! - **Table-driven acceleration**: velocity ceilings mapped to tick periods,
//!   validated once at construction
//! - **Soft landing**: brakes one velocity unit per step to stop on target
//! - **Interrupt-safe sharing**: [`SharedGauge`] for timer callbacks
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: Define gauges and mappers in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gauge_stepper::{GaugeBuilder, GpioPulseEmitter, PositionMapper, SystemConfig};
//!
//! let config: SystemConfig = gauge_stepper::load_config("gauges.toml")?;
//! let gauge_config = config.gauge("frequency").unwrap();
//! let profile = gauge_config.profile()?;
//!
//! let mut gauge = GaugeBuilder::new()
//!     .from_gauge_config(gauge_config)
//!     .emitter(GpioPulseEmitter::new(step_pin, dir_pin, reset_pin, delay))
//!     .timer(timer)
//!     .profile(&profile)
//!     .build()?;
//!
//! gauge.zero()?;
//!
//! let mut mapper = PositionMapper::from_config(config.mapper("grid").unwrap())?;
//! mapper.apply(50.02, &mut gauge);
//!
//! // From the timer callback:
//! gauge.advance()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod log;

// Core modules
pub mod config;
pub mod driver;
pub mod error;
pub mod mapper;
pub mod motion;

// Re-exports for ergonomic API
pub use config::{validate_config, GaugeConfig, MapperConfig, SystemConfig};
pub use driver::{
    GaugeBuilder, GpioPulseEmitter, PeriodicTimer, PulseEmitter, SharedGauge, StepperDriver,
};
pub use error::{ConfigError, DriverError, Error, Result};
pub use mapper::{PositionMapper, PositionSink};
pub use motion::{AccelStep, AccelerationProfile, Direction, MotionState, X12_PROFILE};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Microseconds, Milliseconds};
