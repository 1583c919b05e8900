use axum::extract::{Path, State};

use crate::api::{
    state::AppState,
    types::{parse_id, ApiResponse, ApiResult},
};
use crate::domain::Team;

/// GET /api/v1/teams
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Vec<Team>> {
    let teams = state.service.teams().await?;
    Ok(ApiResponse::ok(teams))
}

/// GET /api/v1/teams/:id
pub async fn get_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Team> {
    let team_id = parse_id(&id, "team ID")?;
    let team = state.service.team(team_id).await?;
    Ok(ApiResponse::ok(team))
}
