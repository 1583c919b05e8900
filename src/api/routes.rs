use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(handlers::health_handler))
        // Reference data
        .route("/teams", get(handlers::list_teams))
        .route("/teams/:id", get(handlers::get_team))
        .route("/seasons", get(handlers::list_seasons))
        .route("/seasons/:id", get(handlers::get_season))
        .route("/seasons/:id/summary", get(handlers::get_season_summary))
        .route("/seasons/:id/teams", get(handlers::get_season_teams))
        .route("/matches", get(handlers::list_matches))
        .route("/matches/:id", get(handlers::get_match))
        .route("/matches/:id/events", get(handlers::get_match_events))
        .route("/matches/season/:season_id", get(handlers::get_matches_by_season))
        .route("/players", get(handlers::list_players))
        .route("/players/positions", get(handlers::get_player_positions))
        .route("/players/nationalities", get(handlers::get_player_nationalities))
        .route("/players/:id", get(handlers::get_player))
        .route("/players/:id/stats", get(handlers::get_player_stats))
        .route("/search", get(handlers::search))
        // Standings
        .route("/standings", get(handlers::get_standings))
        .route("/standings/seasons", get(handlers::get_available_seasons))
        .route("/standings/:season_id", get(handlers::get_standings_by_season))
        .route(
            "/standings/team/:team_id/season/:season_id",
            get(handlers::get_team_stats),
        )
        // Stats and reports
        .route("/stats/standings", get(handlers::get_standings))
        .route("/stats/top-scorers", get(handlers::get_top_scorers))
        .route("/reports/data-completeness", get(handlers::get_data_completeness))
        .route("/reports/season-completeness", get(handlers::get_season_completeness));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
}
