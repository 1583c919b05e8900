use axum::extract::{Query, State};
use tracing::info;

use crate::analytics::{CompletenessReport, SeasonCompleteness};
use crate::api::{
    state::AppState,
    types::{parse_optional, ApiError, ApiResponse, ApiResult, YearQuery},
};

/// GET /api/v1/reports/data-completeness
pub async fn get_data_completeness(State(state): State<AppState>) -> ApiResult<CompletenessReport> {
    info!("Generating data completeness report");
    let report = state.service.completeness_report().await?;
    Ok(ApiResponse::ok(report))
}

/// GET /api/v1/reports/season-completeness?year=
pub async fn get_season_completeness(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> ApiResult<SeasonCompleteness> {
    let year = parse_optional::<i32>(query.year.as_deref(), "year parameter")?
        .ok_or_else(|| ApiError::BadRequest("Year parameter required".to_string()))?;
    let season = state.service.season_completeness(year).await?;
    Ok(ApiResponse::ok(season))
}
