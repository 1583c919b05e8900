use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::services::StatsService;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StatsService>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: Arc<StatsService>) -> Self {
        Self {
            service,
            start_time: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}
