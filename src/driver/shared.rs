//! Interrupt-safe home for a driver shared by the timer callback and the
//! application.
//!
//! The timer callback calls [`SharedGauge::on_tick`]; application code calls
//! [`SharedGauge::set_position`], [`SharedGauge::zero`] and the status
//! queries. Every access runs inside a critical section, so a tick never
//! observes a half-applied command.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;

use crate::error::{DriverError, Result};

use super::driver::StepperDriver;
use super::emitter::PulseEmitter;
use super::timer::PeriodicTimer;

/// A [`StepperDriver`] behind a critical-section mutex.
///
/// Can live in a `static`:
///
/// ```rust,ignore
/// static GAUGE: SharedGauge<'static, Emitter, Timer> = SharedGauge::new();
///
/// fn timer_callback() {
///     GAUGE.on_tick();
/// }
/// ```
pub struct SharedGauge<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    driver: Mutex<RefCell<Option<StepperDriver<'a, E, T>>>>,
    /// Target received while the driver was out for calibration.
    pending: Mutex<Cell<Option<u32>>>,
}

impl<'a, E, T> Default for SharedGauge<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E, T> SharedGauge<'a, E, T>
where
    E: PulseEmitter,
    T: PeriodicTimer,
{
    /// Create an empty holder. Ticks are ignored until a driver is installed.
    pub const fn new() -> Self {
        Self {
            driver: Mutex::new(RefCell::new(None)),
            pending: Mutex::new(Cell::new(None)),
        }
    }

    /// Install a driver, returning the one it replaces.
    ///
    /// A target commanded while no driver was installed is applied to the
    /// new driver.
    pub fn install(
        &self,
        mut driver: StepperDriver<'a, E, T>,
    ) -> Option<StepperDriver<'a, E, T>> {
        critical_section::with(|cs| {
            if let Some(position) = self.pending.borrow(cs).take() {
                driver.set_target_position(position);
            }
            self.driver.borrow_ref_mut(cs).replace(driver)
        })
    }

    /// Remove the driver.
    pub fn uninstall(&self) -> Option<StepperDriver<'a, E, T>> {
        critical_section::with(|cs| self.driver.borrow_ref_mut(cs).take())
    }

    /// Timer callback body. A no-op when no driver is installed.
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            if let Some(driver) = self.driver.borrow_ref_mut(cs).as_mut() {
                if let Err(_e) = driver.advance() {
                    warn!("tick failed at step {}", driver.current_step());
                }
            }
        });
    }

    /// Command a move to an absolute step, clamped to the gauge range.
    ///
    /// While no driver is installed, including during [`zero`](Self::zero),
    /// the command is held and applied by the next `install` or once
    /// calibration finishes; a later command replaces an earlier one.
    pub fn set_position(&self, position: u32) {
        critical_section::with(|cs| match self.driver.borrow_ref_mut(cs).as_mut() {
            Some(driver) => driver.set_target_position(position),
            None => {
                debug!("holding target {} until calibrated", position);
                self.pending.borrow(cs).set(Some(position));
            }
        });
    }

    /// Recalibrate against the zero stop.
    ///
    /// The driver is taken out of the mutex for the blocking walk so ticks and
    /// other interrupts keep running.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NotInstalled`] if no driver is installed, or the
    /// pin error that interrupted the walk.
    pub fn zero(&self) -> Result<()> {
        let mut driver = critical_section::with(|cs| self.driver.borrow_ref_mut(cs).take())
            .ok_or(DriverError::NotInstalled)?;

        let result = driver.zero();

        critical_section::with(|cs| {
            if let Some(position) = self.pending.borrow(cs).take() {
                driver.set_target_position(position);
            }
            *self.driver.borrow_ref_mut(cs) = Some(driver);
        });

        result
    }

    /// True when the installed driver has no move in progress.
    ///
    /// False while calibrating or when no driver is installed.
    pub fn stopped(&self) -> bool {
        self.with_driver(|driver| driver.stopped()).unwrap_or(false)
    }

    /// Total steps of the installed driver.
    pub fn total_steps(&self) -> Option<u32> {
        self.with_driver(|driver| driver.total_steps())
    }

    /// Run `f` against the installed driver inside a critical section.
    pub fn with_driver<R>(&self, f: impl FnOnce(&mut StepperDriver<'a, E, T>) -> R) -> Option<R> {
        critical_section::with(|cs| self.driver.borrow_ref_mut(cs).as_mut().map(f))
    }
}
