use crate::domains::case::models::case::CaseDetailResponse;
use crate::domains::case::models::opening::{
    CooldownResponse, OpenCaseRequest, OpenCaseResponse, OpeningHistoryResponse,
};
use crate::shared::errors::CaseError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::convert::Into;

/// 오프닝 내역 쿼리 파라미터
/// Opening history query parameters
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 케이스 상세 조회 핸들러
/// Get case detail handler
#[utoipa::path(
    get,
    path = "/api/case/{id}",
    params(
        ("id" = u64, Path, description = "Case ID")
    ),
    responses(
        (status = 200, description = "Case detail with items and prizes", body = CaseDetailResponse),
        (status = 404, description = "Case not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Cases"
)]
pub async fn get_case(
    State(app_state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CaseDetailResponse>, (StatusCode, Json<serde_json::Value>)> {
    let detail = app_state
        .case_state
        .case_service
        .find_one(id)
        .await
        .map_err(|e: CaseError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(detail))
}

/// 케이스 오프닝 핸들러
/// Open case handler
/// Note: user_id는 JWT 토큰에서 자동 추출됨
#[utoipa::path(
    post,
    path = "/api/case/{id}/open",
    params(
        ("id" = u64, Path, description = "Case ID")
    ),
    request_body = OpenCaseRequest,
    responses(
        (status = 200, description = "Case opened, prizes drawn and balance debited", body = OpenCaseResponse),
        (status = 400, description = "Insufficient funds or invalid multiplier"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 403, description = "User is banned"),
        (status = 404, description = "Case or user not found"),
        (status = 409, description = "Too many concurrent requests (retryable)"),
        (status = 429, description = "Free case cooldown active"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Cases",
    security(("BearerAuth" = []))
)]
pub async fn open_case(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
    Json(request): Json<OpenCaseRequest>,
) -> Result<Json<OpenCaseResponse>, (StatusCode, Json<serde_json::Value>)> {
    let multiplier = request.multiplier.unwrap_or(1);

    let response = app_state
        .case_state
        .case_service
        .open_case(
            authenticated_user.user_id,
            &authenticated_user.username,
            id,
            multiplier,
        )
        .await
        .map_err(|e: CaseError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 쿨다운 상태 조회 핸들러
/// Check cooldown status handler
///
/// 유료 케이스는 항상 ready: true (쿨다운은 무료 케이스에만 적용).
#[utoipa::path(
    get,
    path = "/api/case/{id}/cooldown",
    params(
        ("id" = u64, Path, description = "Case ID")
    ),
    responses(
        (status = 200, description = "Cooldown status", body = CooldownResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 404, description = "Case not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Cases",
    security(("BearerAuth" = []))
)]
pub async fn check_cooldown(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<CooldownResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .case_state
        .case_service
        .check_cooldown(authenticated_user.user_id, id)
        .await
        .map_err(|e: CaseError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 내 오프닝 내역 조회 핸들러
/// Get my opening history handler
#[utoipa::path(
    get,
    path = "/api/case/openings/my",
    params(
        ("limit" = Option<i64>, Query, description = "Page size (default 50, max 200)"),
        ("offset" = Option<i64>, Query, description = "Page offset (default 0)")
    ),
    responses(
        (status = 200, description = "Opening history, newest first", body = OpeningHistoryResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Cases",
    security(("BearerAuth" = []))
)]
pub async fn get_my_openings(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<OpeningHistoryResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .case_state
        .case_service
        .get_history(authenticated_user.user_id, query.limit, query.offset)
        .await
        .map_err(|e: CaseError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}
