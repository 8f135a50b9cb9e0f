use std::sync::Arc;
use anyhow::Result;

use crate::domains::case::engine::{EngineConfig, OsRandom, PostgresStore, WageringEngine};
use crate::domains::case::services::state::CaseState;
use crate::domains::leaderboard::services::state::LeaderboardState;
use crate::shared::clients::TelegramClient;
use crate::shared::database::Database;
use crate::shared::services::JwtService;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 각 도메인의 State를 조합하여 전체 애플리케이션 상태를 관리
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    /// Database connection (shared)
    pub db: Database,
    pub case_state: CaseState,
    pub leaderboard_state: LeaderboardState,
    /// JWT 검증 서비스 (인증 미들웨어가 사용)
    pub jwt_service: JwtService,
}

impl AppState {
    /// Create AppState with database
    /// 모든 도메인 State를 초기화하고 조합
    pub fn new(db: Database) -> Result<Self> {
        // 1. 공유 서비스 생성 (JWT 등)
        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string());
        let jwt_service = JwtService::new(jwt_secret);

        // 2. 베팅 엔진 생성 (운영: Postgres 저장소 + OS CSPRNG)
        // 하나의 인스턴스만 생성하고 모든 곳에서 공유합니다.
        let store = Arc::new(PostgresStore::new(db.pool().clone()));
        let engine = Arc::new(WageringEngine::new(
            store.clone(),
            Box::new(OsRandom),
            EngineConfig::default(),
        ));

        // 3. 텔레그램 알림 (환경변수 없으면 비활성)
        let telegram = TelegramClient::from_env()?.map(Arc::new);

        // 4. 각 도메인 State 생성
        let case_state = CaseState::new(db.clone(), engine.clone(), telegram);
        let leaderboard_state = LeaderboardState::new(engine.store());

        Ok(Self {
            db,
            case_state,
            leaderboard_state,
            jwt_service,
        })
    }
}
