// =====================================================
// 베팅 엔진 모듈
// Wagering Transaction Engine Module
// =====================================================
// 케이스 오프닝의 핵심 로직을 제공합니다.
//
// 구조:
// - types: 엔진 내부 타입 정의
// - probability: 가중치 추첨 테이블 (순수 값 타입)
// - rng: 난수 공급자 (운영 = OS CSPRNG, 테스트 = 시드 고정)
// - cooldown: 무료 케이스 쿨다운 계산 (순수 함수)
// - ledger: 잔고 원장 (차감/충전의 유일한 소유자)
// - coordinator: 오프닝 상태 머신 (WageringEngine)
// - WagerStore trait: 영속성 인터페이스 (구현체와 분리)
// - postgres_store: 운영용 구현 (sqlx/PostgreSQL)
// - memory_store: 인메모리 구현 (통합 테스트용)
//
// 설계 철학:
// - 인터페이스와 구현 분리 (Dependency Inversion)
// - 엔진은 WagerStore trait만 참조 (구체적 저장소 몰라도 됨)
// - 원자성은 저장소가 보장 ("전부 또는 전무"), 엔진은 보상 로직 없음
// =====================================================

pub mod cooldown;
pub mod coordinator;
pub mod ledger;
pub mod memory_store;
pub mod postgres_store;
pub mod probability;
pub mod rng;
pub mod types;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::shared::errors::CaseError;
pub use coordinator::{EngineConfig, WageringEngine};
pub use ledger::BalanceLedger;
pub use memory_store::MemoryStore;
pub use postgres_store::PostgresStore;
pub use probability::ProbabilityTable;
pub use rng::{FixedRandom, OsRandom, RandomSource, SeededRandom};
pub use types::{
    CaseSnapshot, ItemSnapshot, LeaderboardRow, OpeningCommit, OpeningDraw, OpeningOutcome,
    UserPosition, UserRecord, WonPrize,
};

// =====================================================
// WagerStore Trait (영속성 인터페이스)
// =====================================================
// 엔진이 요구하는 저장소 계약을 정의합니다.
// 핵심은 commit_opening: 잔고 차감, 오프닝 기록, 카운터 증가,
// 쿨다운 마킹이 하나의 원자적 단위로 반영되어야 합니다.
// 부분 반영(차감만 되고 기록이 없는 상태 등)은 치명적 불변식 위반이며,
// 애플리케이션 보상이 아니라 저장소의 원자성이 이를 막습니다.
// =====================================================

/// 베팅 영속성 인터페이스
/// Wagering persistence interface
///
/// # 구현체
/// - `PostgresStore`: sqlx 트랜잭션 + 조건부 UPDATE (운영)
/// - `MemoryStore`: 단일 뮤텍스 뒤의 HashMap (테스트)
#[async_trait]
pub trait WagerStore: Send + Sync {
    /// 사용자 레코드 조회
    /// Load a user record
    async fn load_user(&self, user_id: u64) -> Result<Option<UserRecord>, CaseError>;

    /// 케이스 스냅샷 조회 (아이템 + 상금 포함, 읽기 전용)
    /// Load a case snapshot (items + prizes, read-only)
    async fn load_case(&self, case_id: u64) -> Result<Option<CaseSnapshot>, CaseError>;

    /// (user, case) 쌍의 마지막 무료 오프닝 시각 조회
    /// Last free-opening timestamp for a (user, case) pair
    async fn last_free_open(
        &self,
        user_id: u64,
        case_id: u64,
    ) -> Result<Option<DateTime<Utc>>, CaseError>;

    /// 오프닝 커밋 (원자적 단위)
    /// Commit one opening (the atomic unit)
    ///
    /// 차감 조건(잔고 충분, 밴 아님)은 커밋 내부에서 다시 검사됩니다 -
    /// 같은 사용자의 동시 요청이 락 바깥에서 들어와도
    /// (예: 다중 인스턴스) 이중 지출이 불가능합니다.
    ///
    /// # Returns
    /// * `Ok(Decimal)` - 차감 후 잔고
    /// * `Err(InsufficientFunds | UserBanned | UserNotFound)` - 커밋 거부,
    ///   아무것도 반영되지 않음
    async fn commit_opening(&self, commit: OpeningCommit) -> Result<Decimal, CaseError>;

    /// 잔고 증감 (원장 전용, 단일 레코드 조건부 갱신)
    /// Adjust a balance (ledger only, conditional single-row update)
    ///
    /// delta가 음수면 차감: 잔고 부족 시 `InsufficientFunds`,
    /// 밴 상태면 `UserBanned` (같은 원자적 단계에서 검사).
    ///
    /// # Returns
    /// * `Ok(Decimal)` - 변경 후 잔고
    async fn adjust_balance(&self, user_id: u64, delta: Decimal) -> Result<Decimal, CaseError>;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 리더보드 조회 (카운터 스냅샷 읽기, 락 없음)
    // Leaderboard reads (counter snapshot reads, lock-free)
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// volume 내림차순 상위 limit명
    /// Top `limit` users by volume, descending
    ///
    /// 정렬: volume DESC → 오프닝 있는 사용자 우선 → created_at ASC → id ASC
    async fn top_by_volume(&self, limit: usize) -> Result<Vec<LeaderboardRow>, CaseError>;

    /// spins 내림차순 상위 limit명
    /// Top `limit` users by spins, descending
    async fn top_by_spins(&self, limit: usize) -> Result<Vec<LeaderboardRow>, CaseError>;

    /// 사용자의 양쪽 순위 조회 (1-based)
    /// User's rank in both orderings (1-based)
    async fn position_of(&self, user_id: u64) -> Result<Option<UserPosition>, CaseError>;
}
