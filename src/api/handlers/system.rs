use axum::{extract::State, Json};
use tracing::warn;

use crate::api::{
    state::AppState,
    types::{ApiResponse, HealthResponse},
};

/// GET /api/v1/health -- liveness check with store reachability
///
/// Always answers 200; an unreachable store reports `degraded`.
pub async fn health_handler(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let (status, database) = match state.service.ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            warn!("Health check could not reach the store: {}", e);
            ("degraded", "unreachable")
        }
    };

    ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        uptime_secs: state.uptime_seconds(),
    })
}
