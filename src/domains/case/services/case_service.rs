use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domains::case::engine::WageringEngine;
use crate::domains::case::models::case::CaseDetailResponse;
use crate::domains::case::models::opening::{
    CooldownResponse, OpenCaseResponse, OpeningHistoryResponse, WonPrizeResponse,
};
use crate::shared::clients::TelegramClient;
use crate::shared::database::repositories::{CaseRepository, OpeningRepository};
use crate::shared::database::Database;
use crate::shared::errors::CaseError;

// =====================================================
// CaseService - 케이스 도메인 서비스
// =====================================================
// 역할: HTTP 핸들러와 엔진 사이의 파사드
//
// 책임:
// - 오프닝/쿨다운 요청을 엔진에 위임하고 응답 모델로 변환
// - 카탈로그/내역 읽기는 리포지토리로 직접 수행 (엔진 경유 불필요)
// - 오프닝 성공 시 텔레그램 알림을 fire-and-forget으로 전송
//   (알림 실패는 오프닝 결과에 영향을 주지 않음)
// =====================================================

/// 오프닝 내역 기본 페이지 크기
const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// 케이스 서비스
/// Case service
#[derive(Clone)]
pub struct CaseService {
    engine: Arc<WageringEngine>,
    cases: Arc<CaseRepository>,
    openings: Arc<OpeningRepository>,
    telegram: Option<Arc<TelegramClient>>,
}

impl CaseService {
    pub fn new(
        db: Database,
        engine: Arc<WageringEngine>,
        telegram: Option<Arc<TelegramClient>>,
    ) -> Self {
        Self {
            engine,
            cases: Arc::new(CaseRepository::new(db.pool().clone())),
            openings: Arc::new(OpeningRepository::new(db.pool().clone())),
            telegram,
        }
    }

    /// 케이스 상세 조회 (아이템 + 상금)
    /// Get case detail (items + prizes)
    pub async fn find_one(&self, case_id: u64) -> Result<CaseDetailResponse, CaseError> {
        self.cases
            .get_detail(case_id)
            .await
            .map_err(|e| CaseError::DatabaseError(e.to_string()))?
            .ok_or(CaseError::CaseNotFound { id: case_id })
    }

    /// 케이스 오프닝
    /// Open a case
    ///
    /// # Arguments
    /// * `user_id` / `username` - 인증된 사용자 (JWT에서 추출)
    /// * `case_id` - 열 케이스 ID
    /// * `multiplier` - 한 요청에서 열 횟수 (기본 1)
    pub async fn open_case(
        &self,
        user_id: u64,
        username: &str,
        case_id: u64,
        multiplier: u32,
    ) -> Result<OpenCaseResponse, CaseError> {
        let outcome = self.engine.open_case(user_id, case_id, multiplier).await?;

        // 텔레그램 알림 (fire-and-forget - 오프닝 결과와 무관)
        if let Some(telegram) = &self.telegram {
            let telegram = telegram.clone();
            let username = username.to_string();
            let case_name = outcome.case_name.clone();
            let total_won: Decimal = outcome.prizes.iter().map(|prize| prize.amount).sum();
            let spins = outcome.prizes.len();
            tokio::spawn(async move {
                if let Err(e) = telegram
                    .notify_opening(&username, &case_name, total_won, spins)
                    .await
                {
                    eprintln!("Telegram notification failed: {}", e);
                }
            });
        }

        Ok(OpenCaseResponse {
            prizes: outcome
                .prizes
                .into_iter()
                .map(|prize| WonPrizeResponse {
                    prize_id: prize.prize_id,
                    name: prize.name,
                    amount: prize.amount,
                })
                .collect(),
            new_balance: outcome.new_balance,
        })
    }

    /// 쿨다운 상태 조회
    /// Check cooldown status
    pub async fn check_cooldown(
        &self,
        user_id: u64,
        case_id: u64,
    ) -> Result<CooldownResponse, CaseError> {
        let status = self.engine.check_cooldown(user_id, case_id).await?;
        Ok(CooldownResponse {
            ready: status.ready,
            remaining_seconds: status.remaining_seconds(),
        })
    }

    /// 내 오프닝 내역 조회 (최신순)
    /// Get my opening history (newest first)
    pub async fn get_history(
        &self,
        user_id: u64,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<OpeningHistoryResponse, CaseError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, 200);
        let offset = offset.unwrap_or(0).max(0);

        let openings = self
            .openings
            .get_by_user(user_id, limit, offset)
            .await
            .map_err(|e| CaseError::DatabaseError(e.to_string()))?;

        Ok(OpeningHistoryResponse { openings })
    }
}
