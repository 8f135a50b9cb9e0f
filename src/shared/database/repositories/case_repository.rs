use sqlx::{PgPool, Row};
use anyhow::{Context, Result};

use crate::domains::case::engine::types::{CaseSnapshot, ItemSnapshot};
use crate::domains::case::models::case::{Case, CaseDetailResponse, CaseItemDetail, Prize};

pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ID로 케이스 조회
    // Get case by ID
    pub async fn get_by_id(&self, id: u64) -> Result<Option<Case>> {
        let row = sqlx::query(
            "SELECT id, name, price, preview, created_at, updated_at FROM cases WHERE id = $1",
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch case by id")?;

        Ok(row.map(|row| Case {
            id: row.get::<i64, _>("id") as u64,
            name: row.get("name"),
            price: row.get("price"),
            preview: row.get("preview"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    /// 케이스 상세 조회 (아이템 + 상금 조인)
    /// Get case detail (items joined with prizes)
    pub async fn get_detail(&self, id: u64) -> Result<Option<CaseDetailResponse>> {
        let case = match self.get_by_id(id).await? {
            Some(case) => case,
            None => return Ok(None),
        };

        let rows = sqlx::query(
            r#"
            SELECT ci.id AS item_id, ci.chance,
                   p.id AS prize_id, p.name AS prize_name, p.amount AS prize_amount,
                   p.url AS prize_url
            FROM case_items ci
            JOIN prizes p ON p.id = ci.prize_id
            WHERE ci.case_id = $1
            ORDER BY ci.id ASC
            "#,
        )
        .bind(id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch case items")?;

        let items = rows
            .into_iter()
            .map(|row| CaseItemDetail {
                id: row.get::<i64, _>("item_id") as u64,
                chance: row.get("chance"),
                prize: Prize {
                    id: row.get::<i64, _>("prize_id") as u64,
                    name: row.get("prize_name"),
                    amount: row.get("prize_amount"),
                    url: row.get("prize_url"),
                },
            })
            .collect();

        Ok(Some(CaseDetailResponse {
            id: case.id,
            name: case.name,
            price: case.price,
            preview: case.preview,
            items,
        }))
    }

    /// 엔진용 케이스 스냅샷 조회
    /// Get the case snapshot for the engine
    ///
    /// 오프닝 한 건의 모든 추첨은 이 스냅샷 하나를 사용합니다
    /// (어드민 동시 수정과 무관하게 배치 내 일관성 보장).
    pub async fn get_snapshot(&self, id: u64) -> Result<Option<CaseSnapshot>> {
        let case = match self.get_by_id(id).await? {
            Some(case) => case,
            None => return Ok(None),
        };

        let rows = sqlx::query(
            r#"
            SELECT ci.id AS item_id, ci.chance,
                   p.id AS prize_id, p.name AS prize_name, p.amount AS prize_amount
            FROM case_items ci
            JOIN prizes p ON p.id = ci.prize_id
            WHERE ci.case_id = $1
            ORDER BY ci.id ASC
            "#,
        )
        .bind(id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch case snapshot items")?;

        let items = rows
            .into_iter()
            .map(|row| ItemSnapshot {
                case_item_id: row.get::<i64, _>("item_id") as u64,
                prize_id: row.get::<i64, _>("prize_id") as u64,
                prize_name: row.get("prize_name"),
                prize_amount: row.get("prize_amount"),
                chance: row.get("chance"),
            })
            .collect();

        Ok(Some(CaseSnapshot {
            case_id: case.id,
            name: case.name,
            price: case.price,
            items,
        }))
    }
}
