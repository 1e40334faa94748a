use crate::modules::earnings::use_cases::track_earnings::handler::EarningsTracker;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<EarningsTracker>,
}
