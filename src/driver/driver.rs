//! Timer-driven gauge stepper driver.
//!
//! The driver is a discrete-time velocity controller. Every timer tick moves
//! the needle one step, nudges the velocity by at most one unit and re-arms
//! the timer with the period the acceleration profile gives for the new
//! velocity.

use crate::config::units::Microseconds;
use crate::error::{ConfigError, Result};
use crate::motion::{AccelerationProfile, Direction, MotionState};

use super::emitter::PulseEmitter;
use super::timer::PeriodicTimer;

/// Total steps of an X27/X12 gauge movement (315 degrees at 12 steps per degree).
pub const DEFAULT_TOTAL_STEPS: u32 = 315 * 12;

/// Tick period used before a move has picked its first velocity.
pub const DEFAULT_STARTUP_PERIOD: Microseconds = Microseconds(500);

/// Delay between steps of a blocking walk (zeroing).
pub const DEFAULT_ZERO_STEP_DELAY: Microseconds = Microseconds(300);

/// Stepper driver for a single gauge needle.
///
/// Generic over:
/// - `E`: pulse emitter for the step/dir/reset lines
/// - `T`: the periodic timer whose callback calls [`advance`](Self::advance)
///
/// The acceleration profile is borrowed and must outlive the driver.
pub struct StepperDriver<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    emitter: E,
    timer: T,
    profile: &'a AccelerationProfile,
    state: MotionState,
    total_steps: u32,
    startup_period: Microseconds,
    zero_step_delay: Microseconds,
}

impl<'a, E, T> StepperDriver<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    /// Reset the chip and arm the timer at the startup period.
    ///
    /// The driver starts stopped at step 0; ticks are no-ops until the first
    /// [`set_target_position`](Self::set_target_position).
    ///
    /// # Errors
    ///
    /// Returns an error if `total_steps` is zero or the reset pulse fails.
    pub fn begin(
        mut emitter: E,
        mut timer: T,
        total_steps: u32,
        profile: &'a AccelerationProfile,
        startup_period: Microseconds,
        zero_step_delay: Microseconds,
    ) -> Result<Self> {
        if total_steps == 0 {
            return Err(ConfigError::ZeroTotalSteps.into());
        }

        emitter.reset()?;
        timer.start_periodic(startup_period);

        info!(
            "gauge ready: {} steps, max velocity {}",
            total_steps,
            profile.max_velocity()
        );

        Ok(Self {
            emitter,
            timer,
            profile,
            state: MotionState::new(),
            total_steps,
            startup_period,
            zero_step_delay,
        })
    }

    /// True when no move is in progress.
    #[inline]
    pub fn stopped(&self) -> bool {
        self.state.stopped
    }

    /// Number of addressable steps; valid positions are `0..total_steps`.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Snapshot of the motion state.
    #[inline]
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Step the needle is at.
    #[inline]
    pub fn current_step(&self) -> u32 {
        self.state.current_step
    }

    /// The acceleration profile in use.
    #[inline]
    pub fn profile(&self) -> &'a AccelerationProfile {
        self.profile
    }

    /// The pulse emitter.
    #[inline]
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// The periodic timer.
    #[inline]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Command a move to an absolute step. Out-of-range positions are clamped.
    ///
    /// A stopped driver starts a fresh move: the next tick picks the
    /// direction. A moving driver keeps its direction and velocity and only
    /// sees the new target; if the target now lies behind the needle it
    /// brakes to zero velocity before turning round.
    pub fn set_target_position(&mut self, position: u32) {
        let position = position.min(self.total_steps - 1);
        self.state.target_step = position;

        if self.state.stopped {
            self.timer.stop();
            self.state.stopped = false;
            self.state.velocity = 0;
            self.timer.start_periodic(self.startup_period);
            debug!("move {} -> {}", self.state.current_step, position);
        }
    }

    /// Walk the needle to its hard zero stop and recalibrate.
    ///
    /// Blocks for `total_steps - 1` steps at the fixed zero step delay,
    /// whatever the believed position. Never call this from the tick.
    pub fn zero(&mut self) -> Result<()> {
        info!("zeroing over {} steps", self.total_steps - 1);
        self.state.current_step = self.total_steps - 1;
        self.walk_to(0)
    }

    /// Blocking walk to `position` at the fixed zero step delay.
    ///
    /// The timer is disarmed for the walk and stays disarmed; the driver is
    /// left stopped at the clamped position. If a pulse fails the driver is
    /// still stopped, at the last step reached, and the next command re-arms
    /// the timer.
    pub fn walk_to(&mut self, position: u32) -> Result<()> {
        self.timer.stop();
        self.state.park(self.state.current_step);

        let position = position.min(self.total_steps - 1);
        let direction = Direction::toward(self.state.current_step, position);

        while self.state.current_step != position {
            self.emitter.step(direction)?;
            self.state.current_step = match direction {
                Direction::Positive => self.state.current_step + 1,
                _ => self.state.current_step - 1,
            };
            self.emitter.pause(self.zero_step_delay);
        }

        self.state.park(position);
        debug!("parked at {}", position);
        Ok(())
    }

    /// Timer tick: advance the move by one step.
    ///
    /// Never blocks. Re-arms the timer with the period for the new velocity,
    /// or disarms it once the needle rests on the target.
    pub fn advance(&mut self) -> Result<()> {
        let state = &mut self.state;

        if state.stopped {
            return Ok(());
        }

        if state.current_step == state.target_step && state.velocity == 0 {
            state.stopped = true;
            state.direction = Direction::Idle;
            self.timer.stop();
            trace!("arrived at {}", state.current_step);
            return Ok(());
        }

        if state.velocity == 0 {
            state.direction = Direction::toward(state.current_step, state.target_step);
            state.velocity = 1;
        }

        let next = match state.direction {
            Direction::Positive if state.current_step + 1 < self.total_steps => {
                state.current_step + 1
            }
            Direction::Negative if state.current_step > 0 => state.current_step - 1,
            _ => {
                // Hard end stop: the needle cannot go further this way.
                warn!("end stop at {}", state.current_step);
                state.velocity = 0;
                self.timer
                    .start_periodic(self.profile.lookup_period(state.velocity));
                return Ok(());
            }
        };

        self.emitter.step(state.direction)?;
        state.current_step = next;

        // velocity >= 1 here, so the decrements cannot underflow.
        let remaining = state.remaining();
        if remaining > 0 {
            if remaining < state.velocity as i64 {
                state.velocity -= 1;
            } else if state.velocity < self.profile.max_velocity() {
                state.velocity += 1;
            }
        } else {
            state.velocity -= 1;
        }

        self.timer
            .start_periodic(self.profile.lookup_period(state.velocity));
        Ok(())
    }
}
