use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};

use crate::analytics::TeamSeasonStats;
use crate::api::{
    state::AppState,
    types::{parse_id, ApiError, ApiResponse, ApiResult, SeasonQuery},
};
use crate::domain::Season;
use crate::services::Standings;

/// GET /api/v1/standings?season=
///
/// Without a season this lists the seasons that have standings.
pub async fn get_standings(
    State(state): State<AppState>,
    Query(query): Query<SeasonQuery>,
) -> std::result::Result<Response, ApiError> {
    match query.season.as_deref().filter(|s| !s.is_empty()) {
        None => {
            let seasons = state.service.available_seasons().await?;
            Ok(ApiResponse::ok(seasons).into_response())
        }
        Some(raw) => {
            let season_id = parse_id(raw, "season ID")?;
            let standings = state.service.standings(season_id).await?;
            Ok(ApiResponse::ok(standings).into_response())
        }
    }
}

/// GET /api/v1/standings/seasons
pub async fn get_available_seasons(State(state): State<AppState>) -> ApiResult<Vec<Season>> {
    let seasons = state.service.available_seasons().await?;
    Ok(ApiResponse::ok(seasons))
}

/// GET /api/v1/standings/:season_id
pub async fn get_standings_by_season(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> ApiResult<Standings> {
    let season_id = parse_id(&season_id, "season ID")?;
    let standings = state.service.standings(season_id).await?;
    Ok(ApiResponse::ok(standings))
}

/// GET /api/v1/standings/team/:team_id/season/:season_id
pub async fn get_team_stats(
    State(state): State<AppState>,
    Path((team_id, season_id)): Path<(String, String)>,
) -> ApiResult<TeamSeasonStats> {
    let team_id = parse_id(&team_id, "team ID")?;
    let season_id = parse_id(&season_id, "season ID")?;
    let stats = state.service.team_stats(team_id, season_id).await?;
    Ok(ApiResponse::ok(stats))
}
