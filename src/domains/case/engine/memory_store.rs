use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;

use super::types::{
    CaseSnapshot, LeaderboardRow, OpeningCommit, UserPosition, UserRecord,
};
use super::WagerStore;
use crate::shared::errors::CaseError;

// =====================================================
// MemoryStore - 인메모리 저장소
// =====================================================
// 역할: WagerStore의 인메모리 구현 (통합 테스트 / dev 모드)
//
// 원자성:
// - 상태 전체가 뮤텍스 하나 뒤에 있음
// - commit_opening은 어떤 변경도 하기 전에 모든 조건을 검사
//   → 검사 통과 후의 변경은 전부 반영 (전부 또는 전무)
// - 리더보드 읽기도 같은 뮤텍스를 지나므로
//   절반만 반영된 커밋을 관찰할 수 없음
// =====================================================

/// 기록된 오프닝 (인메모리 감사 로그 한 줄)
#[derive(Debug, Clone)]
pub struct StoredOpening {
    pub id: u64,
    pub user_id: u64,
    pub case_id: u64,
    pub case_item_id: u64,
    pub prize_id: u64,
    pub cost_paid: Decimal,
    pub won_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct MemoryState {
    users: HashMap<u64, UserRecord>,
    cases: HashMap<u64, CaseSnapshot>,
    cooldowns: HashMap<(u64, u64), DateTime<Utc>>,
    openings: Vec<StoredOpening>,
    next_opening_id: u64,
}

/// 인메모리 WagerStore 구현
/// In-memory WagerStore implementation
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_opening_id: 1,
                ..Default::default()
            }),
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 시딩 헬퍼 (테스트용)
    // Seeding helpers (for tests)
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// 사용자 추가
    pub fn insert_user(&self, user: UserRecord) {
        self.state.lock().users.insert(user.id, user);
    }

    /// 케이스 추가
    pub fn insert_case(&self, case: CaseSnapshot) {
        self.state.lock().cases.insert(case.case_id, case);
    }

    /// 쿨다운 레코드 직접 설정 (과거 시각 시뮬레이션용)
    /// Set a cooldown record directly (to simulate past openings)
    pub fn set_cooldown(&self, user_id: u64, case_id: u64, last_opened_at: DateTime<Utc>) {
        self.state
            .lock()
            .cooldowns
            .insert((user_id, case_id), last_opened_at);
    }

    /// 사용자의 오프닝 기록 조회 (검증용)
    pub fn openings_of(&self, user_id: u64) -> Vec<StoredOpening> {
        self.state
            .lock()
            .openings
            .iter()
            .filter(|opening| opening.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 리더보드 정렬 키: metric DESC → 오프닝 있는 사용자 우선 → created_at ASC → id ASC
/// Leaderboard sort key (shared by both orderings)
fn rank_key(metric_cmp: std::cmp::Ordering, a: &UserRecord, b: &UserRecord) -> std::cmp::Ordering {
    metric_cmp
        .then_with(|| (b.total_spins > 0).cmp(&(a.total_spins > 0)))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

fn sorted_by_volume(state: &MemoryState) -> Vec<UserRecord> {
    let mut users: Vec<UserRecord> = state.users.values().cloned().collect();
    users.sort_by(|a, b| rank_key(b.total_volume.cmp(&a.total_volume), a, b));
    users
}

fn sorted_by_spins(state: &MemoryState) -> Vec<UserRecord> {
    let mut users: Vec<UserRecord> = state.users.values().cloned().collect();
    users.sort_by(|a, b| rank_key(b.total_spins.cmp(&a.total_spins), a, b));
    users
}

#[async_trait]
impl WagerStore for MemoryStore {
    async fn load_user(&self, user_id: u64) -> Result<Option<UserRecord>, CaseError> {
        Ok(self.state.lock().users.get(&user_id).cloned())
    }

    async fn load_case(&self, case_id: u64) -> Result<Option<CaseSnapshot>, CaseError> {
        Ok(self.state.lock().cases.get(&case_id).cloned())
    }

    async fn last_free_open(
        &self,
        user_id: u64,
        case_id: u64,
    ) -> Result<Option<DateTime<Utc>>, CaseError> {
        Ok(self.state.lock().cooldowns.get(&(user_id, case_id)).copied())
    }

    async fn commit_opening(&self, commit: OpeningCommit) -> Result<Decimal, CaseError> {
        let mut state = self.state.lock();

        // 모든 검사를 변경 전에 수행 (전부 또는 전무)
        let user = state
            .users
            .get(&commit.user_id)
            .ok_or(CaseError::UserNotFound { id: commit.user_id })?;

        if user.is_banned {
            return Err(CaseError::UserBanned {
                user_id: commit.user_id,
            });
        }
        if user.balance < commit.total_cost {
            return Err(CaseError::InsufficientFunds {
                required: commit.total_cost,
                available: user.balance,
            });
        }

        // 여기서부터는 실패 경로 없음 - 전체 반영
        let now = Utc::now();
        let user = state.users.get_mut(&commit.user_id).unwrap();
        user.balance -= commit.total_cost;
        user.total_spins += commit.spins;
        user.total_volume += commit.volume;
        let new_balance = user.balance;

        for draw in &commit.draws {
            let id = state.next_opening_id;
            state.next_opening_id += 1;
            state.openings.push(StoredOpening {
                id,
                user_id: commit.user_id,
                case_id: commit.case_id,
                case_item_id: draw.case_item_id,
                prize_id: draw.prize_id,
                cost_paid: draw.cost_paid,
                won_amount: draw.won_amount,
                created_at: now,
            });
        }

        if let Some(mark_at) = commit.mark_cooldown_at {
            state
                .cooldowns
                .insert((commit.user_id, commit.case_id), mark_at);
        }

        Ok(new_balance)
    }

    async fn adjust_balance(&self, user_id: u64, delta: Decimal) -> Result<Decimal, CaseError> {
        let mut state = self.state.lock();
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or(CaseError::UserNotFound { id: user_id })?;

        if user.is_banned {
            return Err(CaseError::UserBanned { user_id });
        }
        let new_balance = user.balance + delta;
        if new_balance.is_sign_negative() {
            return Err(CaseError::InsufficientFunds {
                required: -delta,
                available: user.balance,
            });
        }

        user.balance = new_balance;
        Ok(new_balance)
    }

    async fn top_by_volume(&self, limit: usize) -> Result<Vec<LeaderboardRow>, CaseError> {
        let state = self.state.lock();
        Ok(sorted_by_volume(&state)
            .into_iter()
            .take(limit)
            .map(|user| LeaderboardRow {
                user_id: user.id,
                username: user.username,
                total_spins: user.total_spins,
                total_volume: user.total_volume,
            })
            .collect())
    }

    async fn top_by_spins(&self, limit: usize) -> Result<Vec<LeaderboardRow>, CaseError> {
        let state = self.state.lock();
        Ok(sorted_by_spins(&state)
            .into_iter()
            .take(limit)
            .map(|user| LeaderboardRow {
                user_id: user.id,
                username: user.username,
                total_spins: user.total_spins,
                total_volume: user.total_volume,
            })
            .collect())
    }

    async fn position_of(&self, user_id: u64) -> Result<Option<UserPosition>, CaseError> {
        let state = self.state.lock();
        let Some(me) = state.users.get(&user_id) else {
            return Ok(None);
        };

        let volume_position = sorted_by_volume(&state)
            .iter()
            .position(|user| user.id == user_id)
            .map(|index| index as u64 + 1)
            .unwrap_or(0);
        let spins_position = sorted_by_spins(&state)
            .iter()
            .position(|user| user.id == user_id)
            .map(|index| index as u64 + 1)
            .unwrap_or(0);

        Ok(Some(UserPosition {
            volume_position,
            spins_position,
            total_spins: me.total_spins,
            total_volume: me.total_volume,
        }))
    }
}
