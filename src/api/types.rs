use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::analytics::TopScorer;
use crate::domain::SearchHit;
use crate::error::StatsError;

/// Upper bound for `limit` on list endpoints
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page size for a season's fixture list when `limit` is absent
pub const DEFAULT_SEASON_PAGE: i64 = 50;

pub const DEFAULT_SEARCH_LIMIT: i64 = 20;
pub const MAX_SEARCH_LIMIT: i64 = 50;

// ============================================================================
// Envelope
// ============================================================================

/// Success envelope: `{"success": true, "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Error envelope: `{"success": false, "error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

/// Error type for API handlers
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
        };

        let body = Json(ErrorBody {
            success: false,
            error: message,
        });

        (status, body).into_response()
    }
}

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StatsError::Validation(msg) => {
                warn!("Rejected request: {}", msg);
                ApiError::BadRequest(msg)
            }
            other => {
                error!("Request failed: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

/// Helper type for handler results
pub type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

// ============================================================================
// Parameter parsing
// ============================================================================

/// Parse a positive integer identifier from a path or query value
pub fn parse_id(value: &str, label: &str) -> std::result::Result<i32, ApiError> {
    match value.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::BadRequest(format!("Invalid {label}"))),
    }
}

/// Parse an optional numeric query value; empty strings count as absent
pub fn parse_optional<T: std::str::FromStr>(
    value: Option<&str>,
    label: &str,
) -> std::result::Result<Option<T>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("Invalid {label}"))),
    }
}

/// Validate a page size and offset pair
pub fn page(
    limit: Option<&str>,
    offset: Option<&str>,
) -> std::result::Result<(Option<i64>, Option<i64>), ApiError> {
    let limit = parse_optional::<i64>(limit, "limit")?;
    let offset = parse_optional::<i64>(offset, "offset")?;
    if limit.is_some_and(|l| l < 0) {
        return Err(ApiError::BadRequest("Invalid limit".to_string()));
    }
    if offset.is_some_and(|o| o < 0) {
        return Err(ApiError::BadRequest("Invalid offset".to_string()));
    }
    Ok((limit.map(|l| l.min(MAX_PAGE_SIZE)), offset))
}

// ============================================================================
// Query strings
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    pub season: Option<String>,
    pub team: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScorersQuery {
    pub season: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerQuery {
    pub search: Option<String>,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub uptime_secs: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopScorersResponse {
    pub top_scorers: Vec<TopScorer>,
    pub season_id: i32,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionsResponse {
    pub positions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NationalitiesResponse {
    pub nationalities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub query: String,
    pub count: usize,
}
