// Case domain routes
// 케이스 도메인 라우터
use axum::{
    routing::{get, post},
    Router,
};
use crate::domains::case::handlers::case_handler;
use crate::shared::services::AppState;

/// Create case router
/// 케이스 라우터 생성
pub fn create_case_router() -> Router<AppState> {
    Router::new()
        .route("/openings/my", get(case_handler::get_my_openings)) // 인증 필요
        .route("/:id", get(case_handler::get_case))
        .route("/:id/open", post(case_handler::open_case)) // 인증 필요
        .route("/:id/cooldown", get(case_handler::check_cooldown)) // 인증 필요
}
