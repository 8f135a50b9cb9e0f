use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use parking_lot::Mutex as PlMutex;
use rust_decimal::Decimal;
use tokio::sync::Mutex as AsyncMutex;
use tokio::time::timeout;

use super::cooldown::{self, CooldownStatus};
use super::probability::ProbabilityTable;
use super::rng::RandomSource;
use super::types::{OpeningCommit, OpeningDraw, OpeningOutcome, WonPrize};
use super::WagerStore;
use crate::shared::errors::CaseError;

// =====================================================
// WageringEngine - 오프닝 트랜잭션 코디네이터
// =====================================================
// 역할: 케이스 오프닝 한 건의 상태 머신
//
// 상태 흐름:
// Validating → (CooldownCheck | BalanceDebit) → Drawing → Recording → Completed
//
// 실패 규칙:
// - Drawing 이전의 모든 실패는 상태를 전혀 건드리지 않고 거부됨
// - 차감 + 추첨 기록 + 카운터 증가 + 쿨다운 마킹은
//   store.commit_opening 하나의 원자적 단위로 반영됨
//   (부분 반영은 저장소의 원자성이 차단 - 보상 로직 없음)
// - 커밋된 추첨은 최종적이며 호출자가 되돌릴 수 없음
//
// 동시성:
// - 같은 사용자의 요청은 사용자별 비동기 뮤텍스로 직렬화
//   (이중 지출 경쟁 차단; 저장소의 조건부 갱신이 2차 방어선)
// - 락 획득은 lock_wait 내로 제한, 초과 시 재시도 가능한 Contention
// - 다른 사용자끼리는 구조적으로 서로 블록하지 않음 (전역 락 없음)
// =====================================================

/// 엔진 설정
/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 무료 케이스 쿨다운 간격
    /// Free case cooldown interval
    pub free_case_cooldown: Duration,

    /// 사용자 락 최대 대기 시간 (초과 시 Contention)
    /// Per-user lock acquisition bound (Contention past this)
    pub lock_wait: StdDuration,

    /// multiplier 상한
    /// Multiplier cap
    pub max_multiplier: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            free_case_cooldown: Duration::hours(24),
            lock_wait: StdDuration::from_secs(5),
            max_multiplier: 10,
        }
    }
}

/// 베팅 트랜잭션 엔진
/// Wagering transaction engine
pub struct WageringEngine {
    store: Arc<dyn WagerStore>,

    /// 난수 공급자 (운영: OsRandom, 테스트: SeededRandom/FixedRandom)
    rng: PlMutex<Box<dyn RandomSource>>,

    /// 사용자별 락 맵
    /// Per-user lock map
    ///
    /// 바깥 뮤텍스는 엔트리 조회/생성 동안만 잡음 (await 없음).
    /// 안쪽 비동기 뮤텍스가 오프닝 한 건 동안 유지됨.
    user_locks: PlMutex<HashMap<u64, Arc<AsyncMutex<()>>>>,

    config: EngineConfig,
}

impl WageringEngine {
    pub fn new(
        store: Arc<dyn WagerStore>,
        rng: Box<dyn RandomSource>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            rng: PlMutex::new(rng),
            user_locks: PlMutex::new(HashMap::new()),
            config,
        }
    }

    /// 저장소 참조 (리더보드/원장 등 읽기 경로 공유용)
    /// Store handle (shared with leaderboard/ledger read paths)
    pub fn store(&self) -> Arc<dyn WagerStore> {
        self.store.clone()
    }

    /// 케이스 오프닝
    /// Open a case
    ///
    /// # Arguments
    /// * `user_id` - 인증된 사용자 ID
    /// * `case_id` - 열 케이스 ID
    /// * `multiplier` - 한 요청에서 열 횟수 (1..=max, 무료 케이스는 1로 고정)
    ///
    /// # Returns
    /// * `Ok(OpeningOutcome)` - 당첨 상금 목록 + 차감 후 잔고
    ///
    /// # Errors
    /// `CaseError`의 모든 종류 (§ shared/errors/case_error.rs).
    /// `Contention`만 자동 재시도 가능.
    pub async fn open_case(
        &self,
        user_id: u64,
        case_id: u64,
        multiplier: u32,
    ) -> Result<OpeningOutcome, CaseError> {
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Validating: 요청 자체 검증 (락 없이 가능한 것만)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        if multiplier == 0 || multiplier > self.config.max_multiplier {
            return Err(CaseError::InvalidMultiplier {
                multiplier,
                max: self.config.max_multiplier,
            });
        }

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 사용자 락 획득 (유한 대기, 초과 시 Contention)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let user_lock = self.lock_entry(user_id);
        let result = match timeout(self.config.lock_wait, user_lock.lock()).await {
            Ok(_guard) => self.open_case_locked(user_id, case_id, multiplier).await,
            Err(_) => Err(CaseError::Contention),
        };

        // 락 맵 정리: 대기자가 없으면 엔트리 제거 (맵 무한 성장 방지)
        drop(user_lock);
        self.release_entry(user_id);

        result
    }

    /// 사용자 락을 잡은 상태에서의 오프닝 본체
    /// Opening body, runs while holding the per-user lock
    async fn open_case_locked(
        &self,
        user_id: u64,
        case_id: u64,
        multiplier: u32,
    ) -> Result<OpeningOutcome, CaseError> {
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Validating: 사용자 / 케이스 로드
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let user = self
            .store
            .load_user(user_id)
            .await?
            .ok_or(CaseError::UserNotFound { id: user_id })?;

        if user.is_banned {
            return Err(CaseError::UserBanned { user_id });
        }

        let snapshot = self
            .store
            .load_case(case_id)
            .await?
            .ok_or(CaseError::CaseNotFound { id: case_id })?;

        // 테이블 구성이 곧 분포 검증 (빈 목록 / 전부 0 / 음수 → InvalidDistribution)
        let weights: Vec<f64> = snapshot.items.iter().map(|item| item.chance).collect();
        let table = ProbabilityTable::from_weights(&weights)?;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // CooldownCheck | BalanceDebit 분기
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let now = Utc::now();
        let (multiplier, total_cost, mark_cooldown_at) = if snapshot.is_free() {
            // 무료 케이스: 쿨다운이 한 번의 무료 추첨을 보장하므로 multiplier는 1로 고정
            let last = self.store.last_free_open(user_id, case_id).await?;
            let status = cooldown::evaluate(last, self.config.free_case_cooldown, now);
            if !status.ready {
                return Err(CaseError::CooldownActive {
                    remaining_seconds: status.remaining_seconds(),
                });
            }
            (1u32, Decimal::ZERO, Some(now))
        } else {
            let total_cost = snapshot.price * Decimal::from(multiplier);
            // 빠른 거부 (정확한 검사는 커밋의 조건부 갱신이 다시 수행)
            if user.balance < total_cost {
                return Err(CaseError::InsufficientFunds {
                    required: total_cost,
                    available: user.balance,
                });
            }
            (multiplier, total_cost, None)
        };

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Drawing: 스냅샷 하나로 multiplier번 독립 추첨
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let unit_cost = snapshot.price;
        let mut draws = Vec::with_capacity(multiplier as usize);
        for _ in 0..multiplier {
            let u = self.rng.lock().next_unit();
            let item = &snapshot.items[table.draw(u)];
            draws.push(OpeningDraw {
                case_item_id: item.case_item_id,
                prize_id: item.prize_id,
                prize_name: item.prize_name.clone(),
                won_amount: item.prize_amount,
                cost_paid: unit_cost,
            });
        }

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Recording: 원자적 커밋 (차감 + 기록 + 카운터 + 쿨다운)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let prizes: Vec<WonPrize> = draws
            .iter()
            .map(|draw| WonPrize {
                prize_id: draw.prize_id,
                name: draw.prize_name.clone(),
                amount: draw.won_amount,
            })
            .collect();

        let commit = OpeningCommit {
            user_id,
            case_id,
            total_cost,
            draws,
            spins: multiplier as u64,
            // volume은 실제 지불액 합계 (무료 오프닝은 0 기여)
            volume: total_cost,
            mark_cooldown_at,
        };

        let new_balance = self.store.commit_opening(commit).await?;

        // Completed
        Ok(OpeningOutcome {
            case_id,
            case_name: snapshot.name,
            prizes,
            new_balance,
        })
    }

    /// 쿨다운 상태 조회
    /// Check cooldown status
    ///
    /// 유료 케이스는 항상 ready (쿨다운은 무료 케이스에만 적용).
    pub async fn check_cooldown(
        &self,
        user_id: u64,
        case_id: u64,
    ) -> Result<CooldownStatus, CaseError> {
        let snapshot = self
            .store
            .load_case(case_id)
            .await?
            .ok_or(CaseError::CaseNotFound { id: case_id })?;

        if !snapshot.is_free() {
            return Ok(CooldownStatus {
                ready: true,
                remaining: Duration::zero(),
            });
        }

        let last = self.store.last_free_open(user_id, case_id).await?;
        Ok(cooldown::evaluate(
            last,
            self.config.free_case_cooldown,
            Utc::now(),
        ))
    }

    /// 사용자 락 엔트리 조회/생성
    /// Get or create the lock entry for a user
    ///
    /// 바깥 뮤텍스를 잡은 채로 await하지 않도록 Arc를 복제해서 반환.
    fn lock_entry(&self, user_id: u64) -> Arc<AsyncMutex<()>> {
        let mut locks = self.user_locks.lock();
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// 사용자 락 엔트리 정리
    /// Drop the lock entry when no one else holds it
    ///
    /// strong_count == 1이면 맵의 Arc만 남은 것 (대기자/보유자 없음).
    /// 대기자는 자기 클론을 들고 있으므로 잘못 제거될 수 없음.
    fn release_entry(&self, user_id: u64) {
        let mut locks = self.user_locks.lock();
        if let Some(entry) = locks.get(&user_id) {
            if Arc::strong_count(entry) == 1 {
                locks.remove(&user_id);
            }
        }
    }
}
