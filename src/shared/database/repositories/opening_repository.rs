use sqlx::{PgPool, Row};
use anyhow::{Context, Result};

use crate::domains::case::models::opening::Opening;

pub struct OpeningRepository {
    pool: PgPool,
}

impl OpeningRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 사용자의 오프닝 내역 조회 (최신순)
    /// Get a user's opening history (newest first)
    ///
    /// 감사 로그는 append-only라서 여기에는 읽기 쿼리만 있습니다.
    /// 기록 자체는 엔진 커밋 트랜잭션 안에서 일어납니다.
    pub async fn get_by_user(&self, user_id: u64, limit: i64, offset: i64) -> Result<Vec<Opening>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, case_id, case_item_id, prize_id,
                   cost_paid, won_amount, created_at
            FROM case_openings
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id as i64)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch opening history")?;

        Ok(rows
            .into_iter()
            .map(|row| Opening {
                id: row.get::<i64, _>("id") as u64,
                user_id: row.get::<i64, _>("user_id") as u64,
                case_id: row.get::<i64, _>("case_id") as u64,
                case_item_id: row.get::<i64, _>("case_item_id") as u64,
                prize_id: row.get::<i64, _>("prize_id") as u64,
                cost_paid: row.get("cost_paid"),
                won_amount: row.get("won_amount"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
