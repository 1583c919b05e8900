use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::{
    state::AppState,
    types::{
        page, parse_id, ApiResponse, ApiResult, MatchQuery, PageQuery, Pagination,
        DEFAULT_SEASON_PAGE,
    },
};
use crate::domain::{GoalEvent, MatchFact, MatchStatus};
use crate::provider::MatchFilter;

/// A match fact with its status at response time
#[derive(Debug, Clone, Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub fact: MatchFact,
    pub status: MatchStatus,
}

impl MatchView {
    fn at(fact: MatchFact, now: DateTime<Utc>) -> Self {
        let status = fact.status(now);
        Self { fact, status }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonMatchesResponse {
    pub matches: Vec<MatchView>,
    pub season_id: i32,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEventsResponse {
    pub match_id: i32,
    pub events: Vec<GoalEvent>,
}

/// GET /api/v1/matches?season=&team=&limit=&offset=
pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
) -> ApiResult<Vec<MatchView>> {
    let season_id = match query.season.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(parse_id(raw, "season ID")?),
        None => None,
    };
    let team_id = match query.team.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(parse_id(raw, "team ID")?),
        None => None,
    };
    let (limit, offset) = page(query.limit.as_deref(), query.offset.as_deref())?;

    let filter = MatchFilter {
        season_id,
        team_id,
        limit,
        offset,
        ..Default::default()
    };
    let now = Utc::now();
    let matches = state
        .service
        .matches(filter)
        .await?
        .into_iter()
        .map(|m| MatchView::at(m, now))
        .collect();
    Ok(ApiResponse::ok(matches))
}

/// GET /api/v1/matches/:id
pub async fn get_match(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<MatchView> {
    let match_id = parse_id(&id, "match ID")?;
    let fact = state.service.match_fact(match_id).await?;
    Ok(ApiResponse::ok(MatchView::at(fact, Utc::now())))
}

/// GET /api/v1/matches/:id/events
pub async fn get_match_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MatchEventsResponse> {
    let match_id = parse_id(&id, "match ID")?;
    let events = state.service.match_goals(match_id).await?;
    Ok(ApiResponse::ok(MatchEventsResponse { match_id, events }))
}

/// GET /api/v1/matches/season/:season_id?limit=&offset=
///
/// Kickoff order, 50 per page unless `limit` is given.
pub async fn get_matches_by_season(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<SeasonMatchesResponse> {
    let season_id = parse_id(&season_id, "season ID")?;
    let (limit, offset) = page(query.limit.as_deref(), query.offset.as_deref())?;
    let pagination = Pagination {
        limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_SEASON_PAGE),
        offset: offset.unwrap_or(0),
    };

    let now = Utc::now();
    let matches = state
        .service
        .season_matches(season_id, pagination.limit, pagination.offset)
        .await?
        .into_iter()
        .map(|m| MatchView::at(m, now))
        .collect();
    Ok(ApiResponse::ok(SeasonMatchesResponse {
        matches,
        season_id,
        pagination,
    }))
}
