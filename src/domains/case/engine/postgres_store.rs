use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

use super::types::{CaseSnapshot, LeaderboardRow, OpeningCommit, UserPosition, UserRecord};
use super::WagerStore;
use crate::shared::database::repositories::user_repository::{AdjustOutcome, UserRepository};
use crate::shared::database::repositories::CaseRepository;
use crate::shared::errors::CaseError;

// =====================================================
// PostgresStore - 운영용 저장소
// =====================================================
// 역할: WagerStore의 sqlx/PostgreSQL 구현
//
// 원자성:
// - commit_opening은 트랜잭션 하나
// - 차감은 조건부 UPDATE (is_banned = FALSE AND balance >= cost)
//   → 레코드 수준에서 이중 지출 차단 (다중 인스턴스에서도 성립)
// - UPDATE가 0건이면 트랜잭션은 자동 롤백되고
//   재조회로 거부 원인을 진단해서 반환
// =====================================================

pub struct PostgresStore {
    pool: PgPool,
    users: UserRepository,
    cases: CaseRepository,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            cases: CaseRepository::new(pool.clone()),
            pool,
        }
    }
}

fn db_err(err: impl std::fmt::Display) -> CaseError {
    CaseError::DatabaseError(err.to_string())
}

#[async_trait]
impl WagerStore for PostgresStore {
    async fn load_user(&self, user_id: u64) -> Result<Option<UserRecord>, CaseError> {
        let user = self.users.get_by_id(user_id).await.map_err(db_err)?;
        Ok(user.map(|user| UserRecord {
            id: user.id,
            username: user.username,
            is_banned: user.is_banned,
            balance: user.balance,
            total_spins: user.total_spins,
            total_volume: user.total_volume,
            created_at: user.created_at,
        }))
    }

    async fn load_case(&self, case_id: u64) -> Result<Option<CaseSnapshot>, CaseError> {
        self.cases.get_snapshot(case_id).await.map_err(db_err)
    }

    async fn last_free_open(
        &self,
        user_id: u64,
        case_id: u64,
    ) -> Result<Option<DateTime<Utc>>, CaseError> {
        let row = sqlx::query(
            "SELECT last_opened_at FROM free_case_cooldowns WHERE user_id = $1 AND case_id = $2",
        )
        .bind(user_id as i64)
        .bind(case_id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(|row| row.get("last_opened_at")))
    }

    async fn commit_opening(&self, commit: OpeningCommit) -> Result<Decimal, CaseError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 1. 조건부 차감 + 카운터 증가 (레코드 수준 이중 지출 가드)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let row = sqlx::query(
            r#"
            UPDATE users
            SET balance = balance - $2,
                total_spins = total_spins + $3,
                total_volume = total_volume + $4,
                updated_at = NOW()
            WHERE id = $1 AND is_banned = FALSE AND balance >= $2
            RETURNING balance
            "#,
        )
        .bind(commit.user_id as i64)
        .bind(commit.total_cost)
        .bind(commit.spins as i64)
        .bind(commit.volume)
        .fetch_optional(&mut tx)
        .await
        .map_err(db_err)?;

        let new_balance: Decimal = match row {
            Some(row) => row.get("balance"),
            None => {
                // 갱신 실패: 트랜잭션 버리고 원인 진단
                drop(tx);
                let diag = sqlx::query("SELECT is_banned, balance FROM users WHERE id = $1")
                    .bind(commit.user_id as i64)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(db_err)?;

                return Err(match diag {
                    None => CaseError::UserNotFound { id: commit.user_id },
                    Some(row) if row.get::<bool, _>("is_banned") => CaseError::UserBanned {
                        user_id: commit.user_id,
                    },
                    Some(row) => CaseError::InsufficientFunds {
                        required: commit.total_cost,
                        available: row.get("balance"),
                    },
                });
            }
        };

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 2. 오프닝 기록 (append-only 감사 로그)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        for draw in &commit.draws {
            sqlx::query(
                r#"
                INSERT INTO case_openings
                    (user_id, case_id, case_item_id, prize_id, cost_paid, won_amount)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(commit.user_id as i64)
            .bind(commit.case_id as i64)
            .bind(draw.case_item_id as i64)
            .bind(draw.prize_id as i64)
            .bind(draw.cost_paid)
            .bind(draw.won_amount)
            .execute(&mut tx)
            .await
            .map_err(db_err)?;
        }

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 3. 쿨다운 마킹 (무료 케이스 경로)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        if let Some(mark_at) = commit.mark_cooldown_at {
            sqlx::query(
                r#"
                INSERT INTO free_case_cooldowns (user_id, case_id, last_opened_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, case_id)
                DO UPDATE SET last_opened_at = EXCLUDED.last_opened_at
                "#,
            )
            .bind(commit.user_id as i64)
            .bind(commit.case_id as i64)
            .bind(mark_at)
            .execute(&mut tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(new_balance)
    }

    async fn adjust_balance(&self, user_id: u64, delta: Decimal) -> Result<Decimal, CaseError> {
        match self.users.adjust_balance(user_id, delta).await.map_err(db_err)? {
            AdjustOutcome::Applied(balance) => Ok(balance),
            AdjustOutcome::Rejected { is_banned: true, .. } => {
                Err(CaseError::UserBanned { user_id })
            }
            AdjustOutcome::Rejected { balance, .. } => Err(CaseError::InsufficientFunds {
                required: -delta,
                available: balance,
            }),
            AdjustOutcome::NotFound => Err(CaseError::UserNotFound { id: user_id }),
        }
    }

    async fn top_by_volume(&self, limit: usize) -> Result<Vec<LeaderboardRow>, CaseError> {
        let rows = self
            .users
            .top_by_volume(limit as i64)
            .await
            .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|row| LeaderboardRow {
                user_id: row.user_id,
                username: row.username,
                total_spins: row.total_spins,
                total_volume: row.total_volume,
            })
            .collect())
    }

    async fn top_by_spins(&self, limit: usize) -> Result<Vec<LeaderboardRow>, CaseError> {
        let rows = self
            .users
            .top_by_spins(limit as i64)
            .await
            .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|row| LeaderboardRow {
                user_id: row.user_id,
                username: row.username,
                total_spins: row.total_spins,
                total_volume: row.total_volume,
            })
            .collect())
    }

    async fn position_of(&self, user_id: u64) -> Result<Option<UserPosition>, CaseError> {
        let position = self.users.position_of(user_id).await.map_err(db_err)?;
        Ok(position.map(
            |(volume_position, spins_position, total_spins, total_volume)| UserPosition {
                volume_position,
                spins_position,
                total_spins,
                total_volume,
            },
        ))
    }
}
