// =====================================================
// 리더보드 통합 테스트
// =====================================================
// 결정적 정렬 규칙과 카운터 증분 갱신을 검증합니다.
//
// 정렬: metric DESC → 오프닝 있는 사용자 우선 → created_at ASC → id ASC

mod common;
use common::*;

use rust_decimal::Decimal;
use case_api_server::domains::leaderboard::services::LeaderboardService;

fn seeded_user(
    id: u64,
    username: &str,
    spins: u64,
    volume: i64,
) -> case_api_server::domains::case::engine::UserRecord {
    let mut user = test_user(id, username, Decimal::ZERO);
    user.total_spins = spins;
    user.total_volume = Decimal::new(volume, 0);
    user
}

/// 테스트: volume 내림차순 정렬
#[tokio::test]
async fn test_volume_ordering() {
    let (engine, store) = setup_engine();
    store.insert_user(seeded_user(2, "bob", 10, 500));
    store.insert_user(seeded_user(3, "carol", 3, 900));
    store.insert_user(seeded_user(4, "dave", 50, 100));

    let service = LeaderboardService::new(engine.store());
    let board = service.top_by_volume(Some(10)).await.unwrap();

    let order: Vec<u64> = board.entries.iter().map(|e| e.user_id).collect();
    // carol(900) > bob(500) > dave(100) > alice(0, 오프닝 없음)
    assert_eq!(order, vec![3, 2, 4, TEST_USER_ID]);

    // 순위는 1부터
    assert_eq!(board.entries[0].position, 1);
    assert_eq!(board.entries[3].position, 4);
}

/// 테스트: spins 내림차순 정렬
#[tokio::test]
async fn test_spins_ordering() {
    let (engine, store) = setup_engine();
    store.insert_user(seeded_user(2, "bob", 10, 500));
    store.insert_user(seeded_user(3, "carol", 3, 900));
    store.insert_user(seeded_user(4, "dave", 50, 100));

    let service = LeaderboardService::new(engine.store());
    let board = service.top_by_spins(Some(10)).await.unwrap();

    let order: Vec<u64> = board.entries.iter().map(|e| e.user_id).collect();
    // dave(50) > bob(10) > carol(3) > alice(0)
    assert_eq!(order, vec![4, 2, 3, TEST_USER_ID]);
}

/// 테스트: 동점 tie-break
///
/// 같은 metric이면 오프닝 있는 사용자가 먼저,
/// 그 다음 created_at 오름차순 (test_user는 id 순으로 생성 시각 증가).
#[tokio::test]
async fn test_tie_breaks_are_deterministic() {
    let (engine, store) = setup_engine();
    // 전원 volume 0: spins 있는 쪽이 먼저
    store.insert_user(seeded_user(2, "bob", 7, 0));
    store.insert_user(seeded_user(3, "carol", 0, 0));
    store.insert_user(seeded_user(4, "dave", 7, 0));

    let service = LeaderboardService::new(engine.store());
    let board = service.top_by_volume(Some(10)).await.unwrap();

    let order: Vec<u64> = board.entries.iter().map(|e| e.user_id).collect();
    // bob/dave (오프닝 있음, created_at 순) > alice/carol (없음, created_at 순)
    assert_eq!(order, vec![2, 4, TEST_USER_ID, 3]);

    // 같은 조회를 반복해도 순서 동일 (결정적)
    let again = service.top_by_volume(Some(10)).await.unwrap();
    let order_again: Vec<u64> = again.entries.iter().map(|e| e.user_id).collect();
    assert_eq!(order, order_again);
}

/// 테스트: limit 적용
#[tokio::test]
async fn test_limit_is_applied() {
    let (engine, store) = setup_engine();
    for id in 2..=6 {
        store.insert_user(seeded_user(id, &format!("user{}", id), id, id as i64 * 10));
    }

    let service = LeaderboardService::new(engine.store());
    let board = service.top_by_volume(Some(3)).await.unwrap();
    assert_eq!(board.entries.len(), 3);
}

/// 테스트: 내 순위 조회 (양쪽 기준, 1-based)
#[tokio::test]
async fn test_my_position() {
    let (engine, store) = setup_engine();
    store.insert_user(seeded_user(2, "bob", 10, 500));
    store.insert_user(seeded_user(3, "carol", 3, 900));

    let service = LeaderboardService::new(engine.store());
    let position = service.my_position(2).await.unwrap();

    assert_eq!(position.volume_position, 2); // carol(900) > bob(500)
    assert_eq!(position.spins_position, 1); // bob(10) > carol(3)
    assert_eq!(position.total_spins, 10);
    assert_eq!(position.total_volume, Decimal::new(500, 0));
}

/// 테스트: 오프닝이 카운터를 증분 갱신
///
/// 오프닝 커밋 후 리더보드가 spins/volume 증가를 바로 반영해야 합니다.
#[tokio::test]
async fn test_openings_update_counters() {
    let (engine, _store) = setup_engine();
    let service = LeaderboardService::new(engine.store());

    engine
        .open_case(TEST_USER_ID, PAID_CASE_ID, 3)
        .await
        .expect("Opening should succeed");

    let position = service.my_position(TEST_USER_ID).await.unwrap();
    assert_eq!(position.total_spins, 3);
    assert_eq!(position.total_volume, case_price() * Decimal::from(3u32));
}
