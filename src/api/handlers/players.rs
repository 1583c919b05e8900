use axum::extract::{Path, Query, State};

use crate::api::{
    state::AppState,
    types::{
        page, parse_id, parse_optional, ApiResponse, ApiResult, NationalitiesResponse,
        PlayerQuery, PositionsResponse, SearchQuery, SearchResponse, SeasonQuery,
        DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT,
    },
};
use crate::domain::{Player, PlayerSeasonStats};
use crate::provider::PlayerFilter;

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// GET /api/v1/players?search=&position=&nationality=&limit=&offset=
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> ApiResult<Vec<Player>> {
    let (limit, offset) = page(query.limit.as_deref(), query.offset.as_deref())?;
    let filter = PlayerFilter {
        search: non_empty(query.search),
        position: non_empty(query.position),
        nationality: non_empty(query.nationality),
        limit,
        offset,
    };
    let players = state.service.players(filter).await?;
    Ok(ApiResponse::ok(players))
}

/// GET /api/v1/players/:id
pub async fn get_player(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Player> {
    let player_id = parse_id(&id, "player ID")?;
    let player = state.service.player(player_id).await?;
    Ok(ApiResponse::ok(player))
}

/// GET /api/v1/players/:id/stats?season=
///
/// Newest season first; an unknown player is 404, a player without rows is an empty list.
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> ApiResult<Vec<PlayerSeasonStats>> {
    let player_id = parse_id(&id, "player ID")?;
    let season_id = match query.season.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(parse_id(raw, "season ID")?),
        None => None,
    };
    let stats = state.service.player_stats(player_id, season_id).await?;
    Ok(ApiResponse::ok(stats))
}

/// GET /api/v1/players/positions
pub async fn get_player_positions(State(state): State<AppState>) -> ApiResult<PositionsResponse> {
    let positions = state.service.player_positions().await?;
    Ok(ApiResponse::ok(PositionsResponse { positions }))
}

/// GET /api/v1/players/nationalities
pub async fn get_player_nationalities(
    State(state): State<AppState>,
) -> ApiResult<NationalitiesResponse> {
    let nationalities = state.service.player_nationalities().await?;
    Ok(ApiResponse::ok(NationalitiesResponse { nationalities }))
}

/// GET /api/v1/search?q=&limit=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<SearchResponse> {
    let term = query.q.unwrap_or_default();
    let limit = match parse_optional::<i64>(query.limit.as_deref(), "limit")? {
        Some(l) if l > 0 && l <= MAX_SEARCH_LIMIT => l,
        _ => DEFAULT_SEARCH_LIMIT,
    };

    let results = state.service.search(&term, limit).await?;
    Ok(ApiResponse::ok(SearchResponse {
        count: results.len(),
        query: term,
        results,
    }))
}
