use std::sync::Arc;
use rust_decimal::Decimal;

use super::WagerStore;
use crate::shared::errors::CaseError;

// =====================================================
// BalanceLedger - 잔고 원장
// =====================================================
// 역할: 잔고 변경의 유일한 소유자
//
// 규칙:
// 1. 차감은 잔고가 충분할 때만 성공 (balance >= 0 불변식의 관문)
// 2. 밴 여부는 차감과 같은 원자적 단계에서 검사
//    (밴 처리와 지출 사이의 경쟁 방지)
// 3. 같은 사용자의 동시 차감은 저장소의 조건부 갱신으로 직렬화됨
//    (stale 잔고를 읽고 통과하는 lost update 불가)
//
// 케이스 오프닝 자체의 차감은 commit_opening 내부에서 같은 조건으로
// 수행되고, 이 타입은 입금 등 오프닝 밖의 흐름에 쓰입니다.
// =====================================================

/// 잔고 원장
/// Balance ledger
#[derive(Clone)]
pub struct BalanceLedger {
    store: Arc<dyn WagerStore>,
}

impl BalanceLedger {
    pub fn new(store: Arc<dyn WagerStore>) -> Self {
        Self { store }
    }

    /// 잔고 차감
    /// Debit a balance
    ///
    /// # Errors
    /// * `InsufficientFunds` - amount > 현재 잔고
    /// * `UserBanned` - 밴 상태 (같은 원자적 단계에서 검사)
    /// * `UserNotFound` - 사용자 없음
    ///
    /// # Returns
    /// 차감 후 잔고
    pub async fn debit(&self, user_id: u64, amount: Decimal) -> Result<Decimal, CaseError> {
        if amount.is_sign_negative() {
            return Err(CaseError::DatabaseError(
                "debit amount must be non-negative".to_string(),
            ));
        }
        self.store.adjust_balance(user_id, -amount).await
    }

    /// 잔고 충전 (입금 등)
    /// Credit a balance (deposits etc.)
    ///
    /// 차감과 대칭적인 의미를 가집니다. 케이스 오프닝 자체는
    /// 충전을 사용하지 않습니다.
    ///
    /// # Returns
    /// 충전 후 잔고
    pub async fn credit(&self, user_id: u64, amount: Decimal) -> Result<Decimal, CaseError> {
        if amount.is_sign_negative() {
            return Err(CaseError::DatabaseError(
                "credit amount must be non-negative".to_string(),
            ));
        }
        self.store.adjust_balance(user_id, amount).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::case::engine::memory_store::MemoryStore;
    use crate::domains::case::engine::types::UserRecord;
    use chrono::Utc;

    fn seeded_store(balance: i64, is_banned: bool) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.insert_user(UserRecord {
            id: 1,
            username: "alice".to_string(),
            is_banned,
            balance: Decimal::new(balance, 0),
            total_spins: 0,
            total_volume: Decimal::ZERO,
            created_at: Utc::now(),
        });
        store
    }

    #[tokio::test]
    async fn test_debit_within_balance() {
        let ledger = BalanceLedger::new(seeded_store(100, false));
        let balance = ledger.debit(1, Decimal::new(30, 0)).await.unwrap();
        assert_eq!(balance, Decimal::new(70, 0));
    }

    #[tokio::test]
    async fn test_debit_beyond_balance_rejected() {
        let store = seeded_store(100, false);
        let ledger = BalanceLedger::new(store.clone());

        let result = ledger.debit(1, Decimal::new(101, 0)).await;
        assert!(matches!(result, Err(CaseError::InsufficientFunds { .. })));

        // 잔고는 그대로
        let user = store.load_user(1).await.unwrap().unwrap();
        assert_eq!(user.balance, Decimal::new(100, 0));
    }

    #[tokio::test]
    async fn test_banned_user_cannot_move_balance() {
        let ledger = BalanceLedger::new(seeded_store(100, true));

        let debit = ledger.debit(1, Decimal::ONE).await;
        assert!(matches!(debit, Err(CaseError::UserBanned { .. })));

        let credit = ledger.credit(1, Decimal::ONE).await;
        assert!(matches!(credit, Err(CaseError::UserBanned { .. })));
    }

    #[tokio::test]
    async fn test_credit_increases_balance() {
        let ledger = BalanceLedger::new(seeded_store(100, false));
        let balance = ledger.credit(1, Decimal::new(50, 0)).await.unwrap();
        assert_eq!(balance, Decimal::new(150, 0));
    }
}
