//! Periodic timer seam.
//!
//! The host creates the hardware timer and registers a callback that calls
//! [`StepperDriver::advance`](super::StepperDriver::advance) (usually through
//! [`SharedGauge::on_tick`](super::SharedGauge::on_tick)). The driver only
//! ever arms, re-arms and disarms it.

use crate::config::units::Microseconds;

/// A re-armable periodic timer.
pub trait PeriodicTimer {
    /// Fire periodically every `period`, replacing any active period.
    fn start_periodic(&mut self, period: Microseconds);

    /// Stop firing. Stopping an idle timer is a no-op.
    fn stop(&mut self);
}
