// Tracker wiring for tests: fixed clock, in-memory store, hourly wage.

use crate::modules::earnings::core::wage_config::{WageConfig, WageKind};
use crate::modules::earnings::use_cases::track_earnings::handler::EarningsTracker;
use crate::shared::core::primitives::FixedWallClock;
use crate::shared::infrastructure::key_value_store::KeyValueStore;
use chrono::{Local, TimeZone};
use std::sync::Arc;

pub const FIXED_TIMESTAMP: &str = "1/15/2024, 9:30:00 AM";

pub fn fixed_clock() -> FixedWallClock {
    let at = Local
        .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
        .single()
        .expect("unambiguous local time");
    FixedWallClock::new(at)
}

/// 36/h accrues exactly 0.001 per tick.
pub fn hourly_config() -> WageConfig {
    WageConfig::new(WageKind::Hourly, Some(36.0), None).expect("valid hourly config")
}

pub async fn make_tracker(store: Arc<dyn KeyValueStore>) -> EarningsTracker {
    EarningsTracker::load(store, Arc::new(fixed_clock()), false).await
}
