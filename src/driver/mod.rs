//! Driver module for gauge-stepper.
//!
//! Provides the timer-driven stepper driver, its hardware seams and an
//! interrupt-safe holder for sharing it with a timer callback.

mod builder;
#[allow(clippy::module_inception)]
mod driver;
mod emitter;
mod shared;
mod timer;

pub use builder::GaugeBuilder;
pub use driver::{
    StepperDriver, DEFAULT_STARTUP_PERIOD, DEFAULT_TOTAL_STEPS, DEFAULT_ZERO_STEP_DELAY,
};
pub use emitter::{GpioPulseEmitter, PulseEmitter, DEFAULT_PULSE_WIDTH, DEFAULT_RESET_HOLD};
pub use shared::SharedGauge;
pub use timer::PeriodicTimer;
