use std::sync::Arc;

use crate::domains::case::engine::WagerStore;
use crate::domains::leaderboard::models::{
    LeaderboardEntry, LeaderboardResponse, MyPositionResponse,
};
use crate::shared::errors::CaseError;

/// 리더보드 기본/최대 조회 인원
const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 100;

/// 리더보드 서비스
/// Leaderboard service
///
/// 카운터 스냅샷만 읽습니다 (오프닝 로그 재계산 없음).
/// 저장소 읽기는 오프닝 커밋과 직렬화되므로
/// 절반만 반영된 카운터를 관찰할 수 없습니다.
#[derive(Clone)]
pub struct LeaderboardService {
    store: Arc<dyn WagerStore>,
}

impl LeaderboardService {
    pub fn new(store: Arc<dyn WagerStore>) -> Self {
        Self { store }
    }

    /// volume 기준 상위 목록
    /// Top users by volume
    pub async fn top_by_volume(
        &self,
        limit: Option<usize>,
    ) -> Result<LeaderboardResponse, CaseError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let rows = self.store.top_by_volume(limit).await?;
        Ok(to_response(rows))
    }

    /// spins 기준 상위 목록
    /// Top users by spins
    pub async fn top_by_spins(
        &self,
        limit: Option<usize>,
    ) -> Result<LeaderboardResponse, CaseError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let rows = self.store.top_by_spins(limit).await?;
        Ok(to_response(rows))
    }

    /// 내 순위 조회 (양쪽 정렬 기준, 1-based)
    /// My rank in both orderings (1-based)
    pub async fn my_position(&self, user_id: u64) -> Result<MyPositionResponse, CaseError> {
        let position = self
            .store
            .position_of(user_id)
            .await?
            .ok_or(CaseError::UserNotFound { id: user_id })?;

        Ok(MyPositionResponse {
            volume_position: position.volume_position,
            spins_position: position.spins_position,
            total_spins: position.total_spins,
            total_volume: position.total_volume,
        })
    }
}

fn to_response(rows: Vec<crate::domains::case::engine::LeaderboardRow>) -> LeaderboardResponse {
    LeaderboardResponse {
        entries: rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| LeaderboardEntry {
                position: index as u64 + 1,
                user_id: row.user_id,
                username: row.username,
                total_spins: row.total_spins,
                total_volume: row.total_volume,
            })
            .collect(),
    }
}
