// Live accrual of the earned amount.
//
// The amount grows by `hourly_rate / 36000` per 100 ms tick while running, so an
// hour of ticks adds exactly the hourly rate. Nothing here is persisted.

use crate::modules::earnings::core::wage_config::WageConfig;
use serde::Serialize;
use std::time::Duration;

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const TICKS_PER_HOUR_DIVISOR: f64 = 36_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AccrualState {
    is_running: bool,
    earned_amount: f64,
}

impl AccrualState {
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn earned_amount(&self) -> f64 {
        self.earned_amount
    }

    /// Flips between running and stopped. Starting is refused while the
    /// configuration is incomplete; stopping is always allowed.
    pub fn toggle(&mut self, config: &WageConfig) -> bool {
        if !self.is_running && !config.can_run() {
            return false;
        }
        self.is_running = !self.is_running;
        true
    }

    /// Stops the timer and zeroes the amount, returning what had been earned.
    pub fn stop_and_zero(&mut self) -> f64 {
        let earned = self.earned_amount;
        *self = Self::default();
        earned
    }

    pub fn tick(&mut self, config: &WageConfig) -> f64 {
        if self.is_running {
            self.earned_amount += config.hourly_rate() / TICKS_PER_HOUR_DIVISOR;
        }
        self.earned_amount
    }

    /// Applies every whole tick contained in `elapsed`.
    pub fn advance(&mut self, config: &WageConfig, elapsed: Duration) -> f64 {
        let ticks = elapsed.as_millis() / TICK_INTERVAL.as_millis();
        for _ in 0..ticks {
            self.tick(config);
        }
        self.earned_amount
    }
}
