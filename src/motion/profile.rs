//! Acceleration profile table.
//!
//! Maps the controller's abstract velocity to the timer period used at that
//! velocity. The table is validated once on construction so the tick path can
//! look periods up without ever running off the end.

use heapless::Vec;
use serde::Deserialize;

use crate::config::units::Microseconds;
use crate::error::{ConfigError, Result};

/// Maximum number of entries in an acceleration profile.
pub const MAX_PROFILE_ENTRIES: usize = 16;

/// Direction of needle motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward step 0.
    Negative,
    /// Not moving.
    #[default]
    Idle,
    /// Toward the last step.
    Positive,
}

impl Direction {
    /// Direction that leads from `from` to `to`.
    ///
    /// Equal positions resolve to `Negative`, matching the tick's start rule.
    #[inline]
    pub fn toward(from: u32, to: u32) -> Self {
        if to > from {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Negative => -1,
            Direction::Idle => 0,
            Direction::Positive => 1,
        }
    }
}

/// One row of an acceleration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelStep {
    /// Highest velocity served by this row.
    #[serde(rename = "velocity")]
    pub velocity_ceiling: u32,

    /// Timer period while velocity is at or below the ceiling.
    #[serde(rename = "period_us")]
    pub period: Microseconds,
}

impl AccelStep {
    /// Create a new profile row.
    #[inline]
    pub const fn new(velocity_ceiling: u32, period_us: u32) -> Self {
        Self {
            velocity_ceiling,
            period: Microseconds(period_us),
        }
    }
}

/// Acceleration curve of the X12 gauge driver.
pub const X12_PROFILE: [AccelStep; 5] = [
    AccelStep::new(20, 4000),
    AccelStep::new(50, 2000),
    AccelStep::new(100, 1000),
    AccelStep::new(150, 750),
    AccelStep::new(300, 450),
];

/// Validated acceleration profile.
///
/// Invariants, checked by [`AccelerationProfile::new`]:
/// - at least one entry
/// - strictly increasing velocity ceilings
/// - the last ceiling equals `max_velocity`
/// - no zero periods
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerationProfile {
    entries: Vec<AccelStep, MAX_PROFILE_ENTRIES>,
    max_velocity: u32,
}

impl AccelerationProfile {
    /// Build a profile, checking the table invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first violated invariant.
    pub fn new(entries: &[AccelStep], max_velocity: u32) -> Result<Self> {
        if max_velocity == 0 {
            return Err(ConfigError::ZeroMaxVelocity.into());
        }

        let last = entries.last().ok_or(ConfigError::EmptyProfile)?;

        if entries.len() > MAX_PROFILE_ENTRIES {
            return Err(ConfigError::TooManyProfileEntries(entries.len()).into());
        }

        for (index, pair) in entries.windows(2).enumerate() {
            if pair[1].velocity_ceiling <= pair[0].velocity_ceiling {
                return Err(ConfigError::ProfileNotIncreasing {
                    index: index + 1,
                    previous: pair[0].velocity_ceiling,
                    ceiling: pair[1].velocity_ceiling,
                }
                .into());
            }
        }

        if let Some(index) = entries.iter().position(|e| e.period.0 == 0) {
            return Err(ConfigError::ZeroPeriod(index).into());
        }

        if last.velocity_ceiling != max_velocity {
            return Err(ConfigError::ProfileMaxMismatch {
                last: last.velocity_ceiling,
                max_velocity,
            }
            .into());
        }

        let entries = Vec::from_slice(entries)
            .map_err(|_| ConfigError::TooManyProfileEntries(entries.len()))?;

        Ok(Self {
            entries,
            max_velocity,
        })
    }

    /// Build a profile whose max velocity is the last ceiling in the table.
    pub fn from_entries(entries: &[AccelStep]) -> Result<Self> {
        let last = entries.last().ok_or(ConfigError::EmptyProfile)?;
        Self::new(entries, last.velocity_ceiling)
    }

    /// The X12 driver's default curve (max velocity 300).
    pub fn x12() -> Self {
        Self {
            entries: X12_PROFILE.iter().copied().collect(),
            max_velocity: 300,
        }
    }

    /// Highest velocity the driver may reach with this profile.
    #[inline]
    pub fn max_velocity(&self) -> u32 {
        self.max_velocity
    }

    /// Table rows in order.
    #[inline]
    pub fn entries(&self) -> &[AccelStep] {
        &self.entries
    }

    /// Timer period for a velocity.
    ///
    /// Returns the period of the first row whose ceiling is `>= velocity`.
    /// Callers must keep `velocity <= max_velocity()`.
    pub fn lookup_period(&self, velocity: u32) -> Microseconds {
        debug_assert!(velocity <= self.max_velocity);
        self.entries
            .iter()
            .find(|e| e.velocity_ceiling >= velocity)
            .or(self.entries.last())
            .map(|e| e.period)
            .unwrap_or_default()
    }
}

impl Default for AccelerationProfile {
    fn default() -> Self {
        Self::x12()
    }
}
