// Leaderboard domain routes
// 리더보드 도메인 라우터
use axum::{routing::get, Router};
use crate::domains::leaderboard::handlers::leaderboard_handler;
use crate::shared::services::AppState;

/// Create leaderboard router
/// 리더보드 라우터 생성
pub fn create_leaderboard_router() -> Router<AppState> {
    Router::new()
        .route("/volume", get(leaderboard_handler::get_by_volume))
        .route("/spins", get(leaderboard_handler::get_by_spins))
        .route("/my-position", get(leaderboard_handler::get_my_position)) // 인증 필요
}
