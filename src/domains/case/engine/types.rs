use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

// =====================================================
// 엔진 내부 타입 정의
// Engine Internal Types
// =====================================================
// 베팅 엔진 내부에서 사용하는 타입들을 정의합니다.
// DB 모델과 분리되어 있으며, 한 오프닝의 원자적 커밋에
// 필요한 데이터만 담습니다.
// =====================================================

/// 엔진이 보는 사용자 레코드
/// User record as seen by the engine
///
/// DB User 모델에서 베팅에 필요한 필드만 가져온 것입니다.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub is_banned: bool,
    pub balance: Decimal,
    pub total_spins: u64,
    pub total_volume: Decimal,
    pub created_at: DateTime<Utc>,
}

/// 케이스 아이템 스냅샷
/// Case item snapshot
#[derive(Debug, Clone)]
pub struct ItemSnapshot {
    pub case_item_id: u64,
    pub prize_id: u64,
    pub prize_name: String,
    pub prize_amount: Decimal,
    /// 가중치 (0 이상)
    pub chance: f64,
}

/// 케이스 스냅샷
/// Case snapshot
///
/// 오프닝 시작 시점에 카탈로그에서 한 번 읽어온 불변 스냅샷입니다.
/// 어드민이 아이템을 동시에 수정해도 이 오프닝의 모든 추첨은
/// 이 스냅샷을 사용합니다 (multiplier 배치 내 모든 추첨 포함).
#[derive(Debug, Clone)]
pub struct CaseSnapshot {
    pub case_id: u64,
    pub name: String,
    pub price: Decimal,
    pub items: Vec<ItemSnapshot>,
}

impl CaseSnapshot {
    /// 무료 (쿨다운 제한) 케이스 여부
    /// Whether this is a free (cooldown-gated) case
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }
}

/// 한 번의 추첨 결과 (커밋용)
/// One draw result (for the commit)
#[derive(Debug, Clone)]
pub struct OpeningDraw {
    pub case_item_id: u64,
    pub prize_id: u64,
    pub prize_name: String,
    pub won_amount: Decimal,
    /// 이 추첨에 귀속되는 비용 (단가, 배치 합계 = total_cost)
    /// Cost attributed to this draw (unit price; batch sum = total_cost)
    pub cost_paid: Decimal,
}

/// 오프닝 커밋 (원자적 단위)
/// Opening commit (the atomic unit)
///
/// 잔고 차감 + 오프닝 기록 + 카운터 증가 + 쿨다운 마킹이
/// 전부 반영되거나 전부 반영되지 않아야 합니다.
#[derive(Debug, Clone)]
pub struct OpeningCommit {
    pub user_id: u64,
    pub case_id: u64,

    /// 총 차감 금액 (price * multiplier, 무료 케이스는 0)
    /// Total debit (price * multiplier, zero for free cases)
    pub total_cost: Decimal,

    /// 추첨 결과 목록 (multiplier 개수만큼)
    pub draws: Vec<OpeningDraw>,

    /// total_spins 증가량
    pub spins: u64,

    /// total_volume 증가량 (= total_cost)
    pub volume: Decimal,

    /// 무료 케이스 경로일 때 쿨다운 마킹 시각
    /// Cooldown mark timestamp on the free-case path
    pub mark_cooldown_at: Option<DateTime<Utc>>,
}

/// 당첨 상금 (엔진 출력)
/// Won prize (engine output)
#[derive(Debug, Clone)]
pub struct WonPrize {
    pub prize_id: u64,
    pub name: String,
    pub amount: Decimal,
}

/// 오프닝 결과 (엔진 출력)
/// Opening outcome (engine output)
#[derive(Debug, Clone)]
pub struct OpeningOutcome {
    pub case_id: u64,
    pub case_name: String,
    pub prizes: Vec<WonPrize>,
    pub new_balance: Decimal,
}

/// 리더보드 한 줄
/// One leaderboard row
#[derive(Debug, Clone)]
pub struct LeaderboardRow {
    pub user_id: u64,
    pub username: String,
    pub total_spins: u64,
    pub total_volume: Decimal,
}

/// 사용자의 리더보드 순위 (양쪽 정렬 기준)
/// User's rank in both leaderboard orderings
#[derive(Debug, Clone)]
pub struct UserPosition {
    /// volume 기준 순위 (1부터)
    pub volume_position: u64,
    /// spins 기준 순위 (1부터)
    pub spins_position: u64,
    pub total_spins: u64,
    pub total_volume: Decimal,
}
