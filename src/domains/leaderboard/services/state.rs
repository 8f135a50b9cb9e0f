// Leaderboard domain state
// 리더보드 도메인 상태
use std::sync::Arc;

use crate::domains::case::engine::WagerStore;
use crate::domains::leaderboard::services::LeaderboardService;

/// Leaderboard domain state
/// 리더보드 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct LeaderboardState {
    pub leaderboard_service: LeaderboardService,
}

impl LeaderboardState {
    /// Create LeaderboardState with the shared store
    /// LeaderboardState 생성 (엔진과 같은 저장소 공유)
    pub fn new(store: Arc<dyn WagerStore>) -> Self {
        Self {
            leaderboard_service: LeaderboardService::new(store),
        }
    }
}
