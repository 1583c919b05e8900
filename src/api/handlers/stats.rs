use axum::extract::{Query, State};

use crate::analytics::scorers::DEFAULT_SCORERS_LIMIT;
use crate::api::{
    state::AppState,
    types::{
        parse_id, parse_optional, ApiError, ApiResponse, ApiResult, ScorersQuery,
        TopScorersResponse, MAX_PAGE_SIZE,
    },
};

/// GET /api/v1/stats/top-scorers?season=&limit=
///
/// Without a season the latest season with results is used.
pub async fn get_top_scorers(
    State(state): State<AppState>,
    Query(query): Query<ScorersQuery>,
) -> ApiResult<TopScorersResponse> {
    let season_id = match query.season.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => parse_id(raw, "season ID")?,
        None => state
            .service
            .available_seasons()
            .await?
            .last()
            .map(|s| s.id)
            .ok_or_else(|| ApiError::NotFound("No season with results".to_string()))?,
    };

    let limit = match parse_optional::<i64>(query.limit.as_deref(), "limit")? {
        Some(l) if l > 0 => l.min(MAX_PAGE_SIZE) as usize,
        _ => DEFAULT_SCORERS_LIMIT,
    };

    let top_scorers = state.service.top_scorers(season_id, limit).await?;
    Ok(ApiResponse::ok(TopScorersResponse {
        top_scorers,
        season_id,
        limit,
    }))
}
