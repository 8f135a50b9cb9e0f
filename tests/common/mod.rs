// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 모든 통합 테스트에서 공통으로 사용하는 셋업 함수 제공
//
// 저장소는 인메모리 구현(MemoryStore)을 사용하고
// 난수는 시드 고정(SeededRandom)이라 외부 서비스 없이
// 결정적으로 실행됩니다.
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let (engine, store) = setup_engine();
//     // 테스트 코드...
// }
// ```
// =====================================================

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use case_api_server::domains::case::engine::{
    CaseSnapshot, EngineConfig, ItemSnapshot, MemoryStore, SeededRandom, UserRecord,
    WageringEngine,
};

// 테스트용 상수
pub const TEST_USER_ID: u64 = 1;
pub const PAID_CASE_ID: u64 = 10;
pub const FREE_CASE_ID: u64 = 20;

/// 유료 케이스 가격
pub fn case_price() -> Decimal {
    Decimal::new(20, 0)
}

/// 초기 잔고 (유료 케이스 5번 열 수 있는 금액)
pub fn initial_balance() -> Decimal {
    Decimal::new(100, 0)
}

/// 테스트 사용자 생성
pub fn test_user(id: u64, username: &str, balance: Decimal) -> UserRecord {
    UserRecord {
        id,
        username: username.to_string(),
        is_banned: false,
        balance,
        total_spins: 0,
        total_volume: Decimal::ZERO,
        // 생성 시각을 id 순서대로 어긋나게 해서 tie-break 검증 가능하게 함
        created_at: Utc::now() - Duration::hours(100 - id as i64),
    }
}

/// 유료 케이스 (가격 20, 아이템 2개)
pub fn paid_case() -> CaseSnapshot {
    CaseSnapshot {
        case_id: PAID_CASE_ID,
        name: "Starter Case".to_string(),
        price: case_price(),
        items: vec![
            ItemSnapshot {
                case_item_id: 101,
                prize_id: 1,
                prize_name: "Common Star".to_string(),
                prize_amount: Decimal::new(5, 0),
                chance: 75.0,
            },
            ItemSnapshot {
                case_item_id: 102,
                prize_id: 2,
                prize_name: "Rare Star".to_string(),
                prize_amount: Decimal::new(100, 0),
                chance: 25.0,
            },
        ],
    }
}

/// 무료 케이스 (가격 0, 쿨다운 제한)
pub fn free_case() -> CaseSnapshot {
    CaseSnapshot {
        case_id: FREE_CASE_ID,
        name: "Daily Free Case".to_string(),
        price: Decimal::ZERO,
        items: vec![
            ItemSnapshot {
                case_item_id: 201,
                prize_id: 3,
                prize_name: "Small Gift".to_string(),
                prize_amount: Decimal::new(1, 0),
                chance: 90.0,
            },
            ItemSnapshot {
                case_item_id: 202,
                prize_id: 4,
                prize_name: "Big Gift".to_string(),
                prize_amount: Decimal::new(50, 0),
                chance: 10.0,
            },
        ],
    }
}

/// 기본 셋업: 사용자 1명 + 유료/무료 케이스, 시드 고정 엔진
pub fn setup_engine() -> (Arc<WageringEngine>, Arc<MemoryStore>) {
    setup_engine_with_config(EngineConfig::default())
}

/// 커스텀 설정 셋업
pub fn setup_engine_with_config(
    config: EngineConfig,
) -> (Arc<WageringEngine>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store.insert_user(test_user(TEST_USER_ID, "alice", initial_balance()));
    store.insert_case(paid_case());
    store.insert_case(free_case());

    let engine = Arc::new(WageringEngine::new(
        store.clone(),
        Box::new(SeededRandom::new(42)),
        config,
    ));
    (engine, store)
}
