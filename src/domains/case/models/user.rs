use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

// =====================================================
// User 모델
// =====================================================
// 역할: 플랫폼 사용자를 나타내는 데이터 모델
//
// 잔고 규칙:
// - balance는 항상 0 이상 (원장이 보장)
// - balance 변경은 오직 Balance Ledger를 통해서만 일어남
//
// 카운터 규칙:
// - total_spins / total_volume은 오프닝 커밋과 같은 트랜잭션에서만 증가
// - 리더보드는 이 카운터만 읽음 (오프닝 로그를 다시 집계하지 않음)
// =====================================================

/// 플랫폼 사용자
/// Platform user
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = User)]
pub struct User {
    /// 사용자 ID (DB에서 자동 생성)
    /// User ID (BIGSERIAL, auto-generated)
    pub id: u64,

    /// 사용자 이름 (텔레그램 username)
    /// Username
    #[schema(example = "Wo_n_il")]
    pub username: String,

    /// 역할: "USER" 또는 "ADMIN"
    /// Role: "USER" or "ADMIN"
    #[schema(example = "USER")]
    pub role: String,

    /// 밴 여부 (밴 상태면 오프닝/출금 불가)
    /// Ban flag (banned users cannot open cases)
    pub is_banned: bool,

    /// 잔고 (항상 0 이상)
    /// Balance (never negative)
    #[schema(value_type = String, example = "1000.0")]
    pub balance: Decimal,

    /// 총 오프닝 횟수 (리더보드용)
    /// Total case openings (leaderboard counter)
    pub total_spins: u64,

    /// 총 베팅 금액 (리더보드용, cost_paid 합계)
    /// Total wagered volume (leaderboard counter, sum of cost_paid)
    #[schema(value_type = String, example = "191922.0")]
    pub total_volume: Decimal,

    /// 계정 생성 시간 (리더보드 동점자 기준)
    /// Created timestamp (leaderboard tie-break)
    pub created_at: DateTime<Utc>,

    /// 마지막 업데이트 시간
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}
