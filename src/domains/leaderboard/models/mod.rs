use serde::Serialize;
use utoipa::ToSchema;
use rust_decimal::Decimal;

// =====================================================
// 리더보드 모델
// =====================================================
// 역할: 리더보드 응답 데이터 모델
//
// 순위 규칙:
// - 카운터(total_spins / total_volume)는 오프닝 커밋마다 증분 갱신됨
//   (오프닝 로그에서 재계산하지 않음)
// - 정렬은 결정적: metric DESC → 오프닝 있는 사용자 우선
//   → created_at ASC → id ASC
// =====================================================

/// 리더보드 항목
/// Leaderboard entry
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = LeaderboardEntry)]
pub struct LeaderboardEntry {
    /// 순위 (1부터)
    /// Rank (1-based)
    #[schema(example = 1)]
    pub position: u64,

    /// 사용자 ID
    pub user_id: u64,

    /// 사용자 이름
    pub username: String,

    /// 총 오프닝 횟수
    /// Total opening count
    pub total_spins: u64,

    /// 총 베팅 금액 (무료 오프닝은 0 기여)
    /// Total wagered amount (free openings contribute zero)
    #[schema(value_type = String, example = "1500.0")]
    pub total_volume: Decimal,
}

/// 리더보드 응답
/// Leaderboard response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = LeaderboardResponse)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

/// 내 순위 응답
/// My position response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = MyPositionResponse)]
pub struct MyPositionResponse {
    /// volume 기준 순위 (1부터)
    pub volume_position: u64,

    /// spins 기준 순위 (1부터)
    pub spins_position: u64,

    pub total_spins: u64,

    #[schema(value_type = String, example = "1500.0")]
    pub total_volume: Decimal,
}
