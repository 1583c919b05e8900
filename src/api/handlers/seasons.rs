use axum::extract::{Path, State};

use crate::analytics::SeasonSummary;
use crate::api::{
    state::AppState,
    types::{parse_id, ApiResponse, ApiResult},
};
use crate::domain::{Season, Team};

/// GET /api/v1/seasons
pub async fn list_seasons(State(state): State<AppState>) -> ApiResult<Vec<Season>> {
    let seasons = state.service.seasons().await?;
    Ok(ApiResponse::ok(seasons))
}

/// GET /api/v1/seasons/:id
pub async fn get_season(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Season> {
    let season_id = parse_id(&id, "season ID")?;
    let season = state.service.season(season_id).await?;
    Ok(ApiResponse::ok(season))
}

/// GET /api/v1/seasons/:id/summary
///
/// `relegated` is omitted until the season has a full set of scored matches.
pub async fn get_season_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SeasonSummary> {
    let season_id = parse_id(&id, "season ID")?;
    let summary = state.service.season_summary(season_id).await?;
    Ok(ApiResponse::ok(summary))
}

/// GET /api/v1/seasons/:id/teams
pub async fn get_season_teams(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Team>> {
    let season_id = parse_id(&id, "season ID")?;
    let teams = state.service.teams_in_season(season_id).await?;
    Ok(ApiResponse::ok(teams))
}
