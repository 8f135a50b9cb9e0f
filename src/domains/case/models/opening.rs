use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

// =====================================================
// Opening 모델
// =====================================================
// 역할: 오프닝(추첨) 기록 데이터 모델
//
// 기록 규칙:
// - case_openings 테이블은 append-only 감사 로그
// - 한 번 기록된 오프닝은 절대 수정/삭제되지 않음
// - 잔고 차감과 같은 트랜잭션에서 기록됨
//   (차감 없는 오프닝, 오프닝 없는 차감은 존재할 수 없음 -
//    무료 케이스는 cost_paid = 0으로 기록)
// =====================================================

/// 오프닝 기록 (감사 로그 한 줄)
/// Opening record (one audit log entry)
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = Opening)]
pub struct Opening {
    /// 오프닝 ID
    pub id: u64,

    /// 오프닝한 사용자 ID
    pub user_id: u64,

    /// 열린 케이스 ID
    pub case_id: u64,

    /// 당첨된 케이스 아이템 ID
    pub case_item_id: u64,

    /// 당첨된 상금 ID
    pub prize_id: u64,

    /// 이 추첨에 지불한 금액 (무료 케이스는 0)
    /// Cost paid for this draw (zero for free cases)
    #[schema(value_type = String, example = "100.0")]
    pub cost_paid: Decimal,

    /// 당첨 금액
    /// Amount won
    #[schema(value_type = String, example = "500.0")]
    pub won_amount: Decimal,

    /// 오프닝 시간
    pub created_at: DateTime<Utc>,
}

/// 케이스 오프닝 요청
/// Open case request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = OpenCaseRequest)]
pub struct OpenCaseRequest {
    /// 한 요청에서 열 횟수 (기본 1, 최대 10)
    /// Number of openings in one request (default 1, max 10)
    #[schema(example = 1)]
    pub multiplier: Option<u32>,
}

/// 당첨 상금 (오프닝 응답용)
/// Won prize (for the open-case response)
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = WonPrizeResponse)]
pub struct WonPrizeResponse {
    pub prize_id: u64,
    pub name: String,
    #[schema(value_type = String, example = "500.0")]
    pub amount: Decimal,
}

/// 케이스 오프닝 응답
/// Open case response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = OpenCaseResponse)]
pub struct OpenCaseResponse {
    /// 당첨된 상금 목록 (multiplier 개수만큼)
    /// Prizes won (one per draw)
    pub prizes: Vec<WonPrizeResponse>,

    /// 차감 후 잔고
    /// Balance after the debit
    #[schema(value_type = String, example = "900.0")]
    pub new_balance: Decimal,
}

/// 쿨다운 상태 응답
/// Cooldown status response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = CooldownResponse)]
pub struct CooldownResponse {
    /// 지금 열 수 있는지 여부
    pub ready: bool,

    /// 남은 대기 시간 (초, ready면 0)
    /// Remaining wait in seconds (zero when ready)
    pub remaining_seconds: i64,
}

/// 오프닝 내역 응답
/// Opening history response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = OpeningHistoryResponse)]
pub struct OpeningHistoryResponse {
    pub openings: Vec<Opening>,
}
