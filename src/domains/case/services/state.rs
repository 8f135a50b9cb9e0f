// Case domain state
// 케이스 도메인 상태
use std::sync::Arc;

use crate::domains::case::engine::WageringEngine;
use crate::domains::case::services::CaseService;
use crate::shared::clients::TelegramClient;
use crate::shared::database::Database;

/// Case domain state
/// 케이스 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct CaseState {
    pub case_service: CaseService,
}

impl CaseState {
    /// Create CaseState with database and engine
    /// CaseState 생성 (데이터베이스 + 엔진 필요)
    pub fn new(
        db: Database,
        engine: Arc<WageringEngine>,
        telegram: Option<Arc<TelegramClient>>,
    ) -> Self {
        Self {
            case_service: CaseService::new(db, engine, telegram),
        }
    }
}
