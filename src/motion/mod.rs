//! Motion module for gauge-stepper.
//!
//! Provides the acceleration table and the motion state record.

mod profile;
mod state;

pub use profile::{AccelStep, AccelerationProfile, Direction, MAX_PROFILE_ENTRIES, X12_PROFILE};
pub use state::MotionState;
