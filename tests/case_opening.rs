// =====================================================
// 케이스 오프닝 통합 테스트
// =====================================================
// 유료 케이스의 차감 + 추첨 + 기록 경로를 검증합니다.

mod common;
use common::*;

use rust_decimal::Decimal;
use case_api_server::shared::errors::CaseError;

/// 테스트: 유료 오프닝 1건 (차감 + 기록 + 카운터)
///
/// 성공한 오프닝은 정확히 price만큼 차감하고,
/// 오프닝 로그 한 줄과 카운터 증가를 같은 커밋으로 남깁니다.
#[tokio::test]
async fn test_paid_opening_debits_and_records() {
    let (engine, store) = setup_engine();

    let outcome = engine
        .open_case(TEST_USER_ID, PAID_CASE_ID, 1)
        .await
        .expect("Opening should succeed");

    assert_eq!(outcome.prizes.len(), 1, "One draw per multiplier unit");
    assert_eq!(outcome.new_balance, initial_balance() - case_price());

    // 감사 로그: 오프닝 한 줄, cost_paid = 가격
    let openings = store.openings_of(TEST_USER_ID);
    assert_eq!(openings.len(), 1);
    assert_eq!(openings[0].case_id, PAID_CASE_ID);
    assert_eq!(openings[0].cost_paid, case_price());

    // 카운터: 같은 커밋에서 증가
    let user = engine
        .store()
        .load_user(TEST_USER_ID)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.total_spins, 1);
    assert_eq!(user.total_volume, case_price());
    assert_eq!(user.balance, initial_balance() - case_price());
}

/// 테스트: 잔고 부족 거부 (변경 없음)
///
/// 잔고가 부족하면 InsufficientFunds로 거부되고
/// 잔고/로그/카운터 어느 것도 변하지 않아야 합니다.
#[tokio::test]
async fn test_insufficient_funds_rejected_without_changes() {
    let (engine, store) = setup_engine();
    store.insert_user(test_user(2, "bob", Decimal::new(10, 0))); // 10 < 20

    let result = engine.open_case(2, PAID_CASE_ID, 1).await;
    assert!(
        matches!(result, Err(CaseError::InsufficientFunds { .. })),
        "Expected InsufficientFunds, got {:?}",
        result
    );

    let user = engine.store().load_user(2).await.unwrap().unwrap();
    assert_eq!(user.balance, Decimal::new(10, 0), "Balance untouched");
    assert_eq!(user.total_spins, 0);
    assert_eq!(user.total_volume, Decimal::ZERO);
    assert!(store.openings_of(2).is_empty(), "No opening recorded");
}

/// 테스트: multiplier 배치 오프닝
///
/// multiplier = 5면 추첨 5번, 차감 price * 5,
/// 로그 5줄, spins +5, volume +price*5.
#[tokio::test]
async fn test_multiplier_batch_opening() {
    let (engine, store) = setup_engine();

    let outcome = engine
        .open_case(TEST_USER_ID, PAID_CASE_ID, 5)
        .await
        .expect("Batch opening should succeed");

    assert_eq!(outcome.prizes.len(), 5);
    assert_eq!(outcome.new_balance, Decimal::ZERO); // 100 - 20*5

    let openings = store.openings_of(TEST_USER_ID);
    assert_eq!(openings.len(), 5);
    for opening in &openings {
        assert_eq!(opening.cost_paid, case_price(), "Unit price per draw");
    }

    let user = engine
        .store()
        .load_user(TEST_USER_ID)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.total_spins, 5);
    assert_eq!(user.total_volume, case_price() * Decimal::from(5u32));
}

/// 테스트: 배치 비용이 잔고를 넘으면 통째로 거부
///
/// 잔고 100으로 multiplier 6 (비용 120)은 부분 실행 없이 거부됩니다.
#[tokio::test]
async fn test_batch_exceeding_balance_rejected_whole() {
    let (engine, store) = setup_engine();

    let result = engine.open_case(TEST_USER_ID, PAID_CASE_ID, 6).await;
    assert!(matches!(result, Err(CaseError::InsufficientFunds { .. })));

    let user = engine
        .store()
        .load_user(TEST_USER_ID)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.balance, initial_balance(), "No partial debit");
    assert!(store.openings_of(TEST_USER_ID).is_empty());
}

/// 테스트: 당첨 상금은 케이스 아이템에서 나옴
///
/// 모든 당첨 상금이 케이스에 실제로 있는 아이템이어야 합니다.
#[tokio::test]
async fn test_won_prizes_come_from_case_items() {
    let (engine, _store) = setup_engine();

    let outcome = engine
        .open_case(TEST_USER_ID, PAID_CASE_ID, 5)
        .await
        .expect("Opening should succeed");

    let valid_prize_ids = [1u64, 2u64];
    for prize in &outcome.prizes {
        assert!(
            valid_prize_ids.contains(&prize.prize_id),
            "Prize {} not in the case",
            prize.prize_id
        );
    }
}
