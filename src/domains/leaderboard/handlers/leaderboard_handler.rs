use crate::domains::leaderboard::models::{LeaderboardResponse, MyPositionResponse};
use crate::shared::errors::CaseError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::convert::Into;

/// 리더보드 쿼리 파라미터
/// Leaderboard query parameters
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// volume 리더보드 조회 핸들러
/// Get leaderboard by volume handler
#[utoipa::path(
    get,
    path = "/api/leaderboard/volume",
    params(
        ("limit" = Option<usize>, Query, description = "Number of entries (default 100, max 100)")
    ),
    responses(
        (status = 200, description = "Top users by total wagered volume", body = LeaderboardResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leaderboard"
)]
pub async fn get_by_volume(
    State(app_state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .leaderboard_state
        .leaderboard_service
        .top_by_volume(query.limit)
        .await
        .map_err(|e: CaseError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// spins 리더보드 조회 핸들러
/// Get leaderboard by spins handler
#[utoipa::path(
    get,
    path = "/api/leaderboard/spins",
    params(
        ("limit" = Option<usize>, Query, description = "Number of entries (default 100, max 100)")
    ),
    responses(
        (status = 200, description = "Top users by total opening count", body = LeaderboardResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leaderboard"
)]
pub async fn get_by_spins(
    State(app_state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .leaderboard_state
        .leaderboard_service
        .top_by_spins(query.limit)
        .await
        .map_err(|e: CaseError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 내 순위 조회 핸들러
/// Get my position handler
/// Note: user_id는 JWT 토큰에서 자동 추출됨
#[utoipa::path(
    get,
    path = "/api/leaderboard/my-position",
    responses(
        (status = 200, description = "My rank in both orderings", body = MyPositionResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leaderboard",
    security(("BearerAuth" = []))
)]
pub async fn get_my_position(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<MyPositionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .leaderboard_state
        .leaderboard_service
        .my_position(authenticated_user.user_id)
        .await
        .map_err(|e: CaseError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}
