// =====================================================
// 동시성 통합 테스트
// =====================================================
// 같은 사용자의 동시 오프닝이 이중 지출 없이 직렬화되는지,
// 다른 사용자끼리는 서로 막지 않는지 검증합니다.

mod common;
use common::*;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::Notify;

use case_api_server::domains::case::engine::{
    CaseSnapshot, EngineConfig, FixedRandom, LeaderboardRow, MemoryStore, OpeningCommit,
    UserPosition, UserRecord, WagerStore, WageringEngine,
};
use case_api_server::shared::errors::CaseError;

/// commit_opening에서 신호를 받을 때까지 멈추는 저장소
/// (사용자 락을 잡은 채로 머무는 요청을 결정적으로 재현)
struct GatedStore {
    inner: MemoryStore,
    /// 커밋 진입 알림 (테스트가 락이 잡힌 시점을 알 수 있게)
    entered: Notify,
    /// 커밋 진행 허가
    release: Notify,
}

impl GatedStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl WagerStore for GatedStore {
    async fn load_user(&self, user_id: u64) -> Result<Option<UserRecord>, CaseError> {
        self.inner.load_user(user_id).await
    }

    async fn load_case(&self, case_id: u64) -> Result<Option<CaseSnapshot>, CaseError> {
        self.inner.load_case(case_id).await
    }

    async fn last_free_open(
        &self,
        user_id: u64,
        case_id: u64,
    ) -> Result<Option<DateTime<Utc>>, CaseError> {
        self.inner.last_free_open(user_id, case_id).await
    }

    async fn commit_opening(&self, commit: OpeningCommit) -> Result<Decimal, CaseError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.commit_opening(commit).await
    }

    async fn adjust_balance(&self, user_id: u64, delta: Decimal) -> Result<Decimal, CaseError> {
        self.inner.adjust_balance(user_id, delta).await
    }

    async fn top_by_volume(&self, limit: usize) -> Result<Vec<LeaderboardRow>, CaseError> {
        self.inner.top_by_volume(limit).await
    }

    async fn top_by_spins(&self, limit: usize) -> Result<Vec<LeaderboardRow>, CaseError> {
        self.inner.top_by_spins(limit).await
    }

    async fn position_of(&self, user_id: u64) -> Result<Option<UserPosition>, CaseError> {
        self.inner.position_of(user_id).await
    }
}

/// 테스트: 동시 오프닝 이중 지출 차단
///
/// 잔고 100, 가격 20으로 같은 사용자가 10건 동시 요청하면
/// 정확히 5건 성공 / 5건 InsufficientFunds여야 하고
/// 최종 잔고는 0, 오프닝 로그는 5줄이어야 합니다.
#[tokio::test]
async fn test_concurrent_opens_no_double_spend() {
    let (engine, store) = setup_engine();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine.open_case(TEST_USER_ID, PAID_CASE_ID, 1).await
        }));
    }

    let mut succeeded = 0;
    let mut insufficient = 0;
    for handle in handles {
        match handle.await.expect("Task should not panic") {
            Ok(_) => succeeded += 1,
            Err(CaseError::InsufficientFunds { .. }) => insufficient += 1,
            Err(other) => panic!("Unexpected error: {:?}", other),
        }
    }

    assert_eq!(succeeded, 5, "Exactly balance/price openings succeed");
    assert_eq!(insufficient, 5);

    let user = engine
        .store()
        .load_user(TEST_USER_ID)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.balance, Decimal::ZERO, "No over-debit");
    assert_eq!(user.total_spins, 5);
    assert_eq!(store.openings_of(TEST_USER_ID).len(), 5);
}

/// 테스트: 락 대기 초과 시 Contention (재시도 가능, 상태 무변경)
///
/// 첫 요청이 사용자 락을 잡은 채 커밋에서 멈춰 있는 동안
/// 같은 사용자의 두 번째 요청은 lock_wait 안에 락을 얻지 못하고
/// Contention으로 거부되어야 합니다.
#[tokio::test]
async fn test_lock_wait_timeout_yields_contention() {
    let inner = MemoryStore::new();
    inner.insert_user(test_user(TEST_USER_ID, "alice", initial_balance()));
    inner.insert_case(paid_case());

    let store = Arc::new(GatedStore::new(inner));
    let engine = Arc::new(WageringEngine::new(
        store.clone(),
        Box::new(FixedRandom::new(vec![0.25])),
        EngineConfig {
            lock_wait: StdDuration::from_millis(50),
            ..EngineConfig::default()
        },
    ));

    // 첫 요청: 락을 잡고 커밋에서 대기
    let first = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.open_case(TEST_USER_ID, PAID_CASE_ID, 1).await })
    };
    store.entered.notified().await;

    // 두 번째 요청: 락을 얻지 못하고 Contention
    let result = engine.open_case(TEST_USER_ID, PAID_CASE_ID, 1).await;
    match result {
        Err(err @ CaseError::Contention) => assert!(err.is_retryable()),
        other => panic!("Expected Contention, got {:?}", other),
    }

    // 첫 요청 진행 허가 → 정상 완료
    store.release.notify_one();
    let outcome = first
        .await
        .expect("Task should not panic")
        .expect("First opening should succeed");
    assert_eq!(outcome.prizes.len(), 1);

    // Contention으로 거부된 요청은 아무것도 반영하지 않음
    let user = engine
        .store()
        .load_user(TEST_USER_ID)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.balance, initial_balance() - case_price());
    assert_eq!(user.total_spins, 1, "Only the first opening committed");
}

/// 테스트: 다른 사용자끼리는 서로 블록하지 않음
///
/// 두 사용자의 동시 오프닝은 둘 다 성공해야 합니다 (전역 락 없음).
#[tokio::test]
async fn test_distinct_users_do_not_block() {
    let (engine, store) = setup_engine();
    store.insert_user(test_user(2, "bob", initial_balance()));

    let engine_a = engine.clone();
    let engine_b = engine.clone();
    let (result_a, result_b) = tokio::join!(
        engine_a.open_case(TEST_USER_ID, PAID_CASE_ID, 1),
        engine_b.open_case(2, PAID_CASE_ID, 1),
    );

    result_a.expect("Alice's opening should succeed");
    result_b.expect("Bob's opening should succeed");
}

/// 테스트: 동시 무료 오프닝은 한 건만 통과
///
/// 쿨다운 검사도 사용자 락 안에서 직렬화되므로
/// 같은 무료 케이스에 대한 동시 요청은 정확히 한 건만 성공합니다.
#[tokio::test]
async fn test_concurrent_free_opens_single_winner() {
    let (engine, store) = setup_engine();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine.open_case(TEST_USER_ID, FREE_CASE_ID, 1).await
        }));
    }

    let mut succeeded = 0;
    let mut on_cooldown = 0;
    for handle in handles {
        match handle.await.expect("Task should not panic") {
            Ok(_) => succeeded += 1,
            Err(CaseError::CooldownActive { .. }) => on_cooldown += 1,
            Err(other) => panic!("Unexpected error: {:?}", other),
        }
    }

    assert_eq!(succeeded, 1, "Cooldown admits exactly one free opening");
    assert_eq!(on_cooldown, 4);
    assert_eq!(store.openings_of(TEST_USER_ID).len(), 1);
}
