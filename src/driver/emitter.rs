//! Pulse emitter: the physical control lines of the gauge driver chip.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{Microseconds, Milliseconds};
use crate::config::GaugeConfig;
use crate::error::{DriverError, Result};
use crate::motion::Direction;

/// Hardware shim that issues single steps.
///
/// Implementations must keep pulse widths bounded; the tick calls
/// [`PulseEmitter::step`] from interrupt context.
pub trait PulseEmitter {
    /// Hold the reset line low for the chip's reset time, then release it.
    fn reset(&mut self) -> Result<()>;

    /// Issue one step in `direction`. `Direction::Idle` emits nothing.
    fn step(&mut self, direction: Direction) -> Result<()>;

    /// Busy-wait between steps of a blocking walk.
    fn pause(&mut self, duration: Microseconds);
}

/// Default step pulse hold time.
pub const DEFAULT_PULSE_WIDTH: Microseconds = Microseconds(1);

/// Default reset line low time.
pub const DEFAULT_RESET_HOLD: Milliseconds = Milliseconds(1);

/// [`PulseEmitter`] over three embedded-hal output pins.
///
/// The direction line is only written when the direction changes.
pub struct GpioPulseEmitter<STEP, DIR, RESET, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    RESET: OutputPin,
    DELAY: DelayNs,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = toward the last step).
    dir_pin: DIR,

    /// Active-low RESET pin.
    reset_pin: RESET,

    /// Delay provider for pulse and hold timing.
    delay: DELAY,

    /// Direction currently latched on the DIR pin.
    current_direction: Option<Direction>,

    pulse_width: Microseconds,
    reset_hold: Milliseconds,
}

impl<STEP, DIR, RESET, DELAY> GpioPulseEmitter<STEP, DIR, RESET, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    RESET: OutputPin,
    DELAY: DelayNs,
{
    /// Create an emitter with the default 1 µs pulse and 1 ms reset hold.
    pub fn new(step_pin: STEP, dir_pin: DIR, reset_pin: RESET, delay: DELAY) -> Self {
        Self {
            step_pin,
            dir_pin,
            reset_pin,
            delay,
            current_direction: None,
            pulse_width: DEFAULT_PULSE_WIDTH,
            reset_hold: DEFAULT_RESET_HOLD,
        }
    }

    /// Set the step pulse hold time. Values below 1 µs are raised to 1 µs.
    pub fn pulse_width(mut self, width: Microseconds) -> Self {
        self.pulse_width = width.max(DEFAULT_PULSE_WIDTH);
        self
    }

    /// Set the reset low time. Values below 1 ms are raised to 1 ms.
    pub fn reset_hold(mut self, hold: Milliseconds) -> Self {
        self.reset_hold = hold.max(DEFAULT_RESET_HOLD);
        self
    }

    /// Take pulse and reset timing from a gauge configuration.
    pub fn with_config(self, config: &GaugeConfig) -> Self {
        self.pulse_width(config.pulse_width).reset_hold(config.reset_hold)
    }

    /// Release the pins and delay.
    pub fn release(self) -> (STEP, DIR, RESET, DELAY) {
        (self.step_pin, self.dir_pin, self.reset_pin, self.delay)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        match direction {
            Direction::Positive => self.dir_pin.set_high(),
            _ => self.dir_pin.set_low(),
        }
        .map_err(|_| DriverError::PinError)?;

        self.current_direction = Some(direction);
        Ok(())
    }
}

impl<STEP, DIR, RESET, DELAY> PulseEmitter for GpioPulseEmitter<STEP, DIR, RESET, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    RESET: OutputPin,
    DELAY: DelayNs,
{
    fn reset(&mut self) -> Result<()> {
        self.reset_pin.set_low().map_err(|_| DriverError::PinError)?;
        self.step_pin.set_low().map_err(|_| DriverError::PinError)?;
        self.set_direction(Direction::Negative)?;
        self.delay.delay_ms(self.reset_hold.0);
        self.reset_pin.set_high().map_err(|_| DriverError::PinError)?;
        Ok(())
    }

    fn step(&mut self, direction: Direction) -> Result<()> {
        if direction == Direction::Idle {
            return Ok(());
        }

        self.set_direction(direction)?;
        self.step_pin.set_high().map_err(|_| DriverError::PinError)?;
        self.delay.delay_us(self.pulse_width.0);
        self.step_pin.set_low().map_err(|_| DriverError::PinError)?;
        Ok(())
    }

    fn pause(&mut self, duration: Microseconds) {
        self.delay.delay_us(duration.0);
    }
}
