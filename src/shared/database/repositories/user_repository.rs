use sqlx::{PgPool, Row};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use crate::domains::case::models::user::User;

pub struct UserRepository {
    pool: PgPool,
}

/// 리더보드 쿼리 결과 행
/// Leaderboard query result row
pub struct LeaderboardUserRow {
    pub user_id: u64,
    pub username: String,
    pub total_spins: u64,
    pub total_volume: Decimal,
}

/// 잔고 증감 시도 결과
/// Balance adjustment attempt result
pub enum AdjustOutcome {
    /// 변경 후 잔고
    Applied(Decimal),
    /// 조건 불충족 (잔고 부족 또는 밴) - 아무것도 변경 안 됨
    Rejected { is_banned: bool, balance: Decimal },
    /// 사용자 없음
    NotFound,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ID로 사용자 조회
    // Get user by ID
    pub async fn get_by_id(&self, id: u64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, role, is_banned, balance, total_spins, total_volume,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        let row = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        Ok(Some(User {
            id: row.get::<i64, _>("id") as u64,
            username: row.get("username"),
            role: row.get("role"),
            is_banned: row.get("is_banned"),
            balance: row.get("balance"),
            total_spins: row.get::<i64, _>("total_spins") as u64,
            total_volume: row.get("total_volume"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    /// 잔고 증감 (조건부 단일 레코드 갱신)
    /// Adjust balance (conditional single-row update)
    ///
    /// 조건(밴 아님, 결과 잔고 >= 0)을 갱신 자체에 포함시켜서
    /// stale 읽기 기반의 lost update를 레코드 수준에서 차단합니다.
    pub async fn adjust_balance(&self, user_id: u64, delta: Decimal) -> Result<AdjustOutcome> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET balance = balance + $2, updated_at = NOW()
            WHERE id = $1 AND is_banned = FALSE AND balance + $2 >= 0
            RETURNING balance
            "#,
        )
        .bind(user_id as i64)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to adjust balance")?;

        if let Some(row) = row {
            return Ok(AdjustOutcome::Applied(row.get("balance")));
        }

        // 갱신 실패 원인 진단 (밴? 잔고 부족? 사용자 없음?)
        let row = sqlx::query("SELECT is_banned, balance FROM users WHERE id = $1")
            .bind(user_id as i64)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to diagnose balance adjustment")?;

        match row {
            Some(row) => Ok(AdjustOutcome::Rejected {
                is_banned: row.get("is_banned"),
                balance: row.get("balance"),
            }),
            None => Ok(AdjustOutcome::NotFound),
        }
    }

    /// volume 기준 상위 limit명
    /// Top users by volume
    ///
    /// 정렬: volume DESC → 오프닝 있는 사용자 우선 → created_at ASC → id ASC
    /// (결정적 정렬 - 페이지네이션/스냅샷 재현 가능)
    pub async fn top_by_volume(&self, limit: i64) -> Result<Vec<LeaderboardUserRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, total_spins, total_volume
            FROM users
            ORDER BY total_volume DESC, (total_spins > 0) DESC, created_at ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch leaderboard by volume")?;

        Ok(rows.into_iter().map(to_leaderboard_row).collect())
    }

    /// spins 기준 상위 limit명
    /// Top users by spins
    pub async fn top_by_spins(&self, limit: i64) -> Result<Vec<LeaderboardUserRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, total_spins, total_volume
            FROM users
            ORDER BY total_spins DESC, (total_spins > 0) DESC, created_at ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch leaderboard by spins")?;

        Ok(rows.into_iter().map(to_leaderboard_row).collect())
    }

    /// 양쪽 정렬 기준에서의 순위 조회 (1-based)
    /// Rank in both orderings (1-based)
    pub async fn position_of(
        &self,
        user_id: u64,
    ) -> Result<Option<(u64, u64, u64, Decimal)>> {
        let row = sqlx::query(
            r#"
            SELECT volume_position, spins_position, total_spins, total_volume
            FROM (
                SELECT id, total_spins, total_volume,
                    ROW_NUMBER() OVER (
                        ORDER BY total_volume DESC, (total_spins > 0) DESC, created_at ASC, id ASC
                    ) AS volume_position,
                    ROW_NUMBER() OVER (
                        ORDER BY total_spins DESC, (total_spins > 0) DESC, created_at ASC, id ASC
                    ) AS spins_position
                FROM users
            ) ranked
            WHERE id = $1
            "#,
        )
        .bind(user_id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user position")?;

        Ok(row.map(|row| {
            (
                row.get::<i64, _>("volume_position") as u64,
                row.get::<i64, _>("spins_position") as u64,
                row.get::<i64, _>("total_spins") as u64,
                row.get("total_volume"),
            )
        }))
    }
}

fn to_leaderboard_row(row: sqlx::postgres::PgRow) -> LeaderboardUserRow {
    LeaderboardUserRow {
        user_id: row.get::<i64, _>("id") as u64,
        username: row.get("username"),
        total_spins: row.get::<i64, _>("total_spins") as u64,
        total_volume: row.get("total_volume"),
    }
}
