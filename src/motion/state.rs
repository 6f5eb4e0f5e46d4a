//! Motion state shared between the timer tick and command calls.

use super::profile::Direction;

/// Mutable motion record of a gauge driver.
///
/// `stopped` implies `velocity == 0` and `direction == Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionState {
    /// Step the needle is at.
    pub current_step: u32,
    /// Step the needle is heading to.
    pub target_step: u32,
    /// Controller velocity, an index into the acceleration profile.
    pub velocity: u32,
    /// Direction of the move in progress.
    pub direction: Direction,
    /// No move in progress; ticks are no-ops.
    pub stopped: bool,
}

impl MotionState {
    /// State of a freshly reset driver: at step 0 and stopped.
    pub const fn new() -> Self {
        Self {
            current_step: 0,
            target_step: 0,
            velocity: 0,
            direction: Direction::Idle,
            stopped: true,
        }
    }

    /// Signed distance to the target along the current direction.
    ///
    /// Positive while approaching, zero on arrival, negative when the needle
    /// is past the target or heading away from it.
    #[inline]
    pub fn remaining(&self) -> i64 {
        (self.target_step as i64 - self.current_step as i64) * self.direction.sign()
    }

    /// Park at `step` with no move pending.
    pub(crate) fn park(&mut self, step: u32) {
        self.current_step = step;
        self.target_step = step;
        self.velocity = 0;
        self.direction = Direction::Idle;
        self.stopped = true;
    }

    /// Check the stopped-state invariant.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        !self.stopped || (self.velocity == 0 && self.direction == Direction::Idle)
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new()
    }
}
