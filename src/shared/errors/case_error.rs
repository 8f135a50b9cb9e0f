use thiserror::Error;
use axum::{http::StatusCode, Json};
use rust_decimal::Decimal;
use serde_json::json;

/// 케이스 오프닝 관련 에러
/// Case-opening related errors
///
/// 엔진이 반환하는 모든 실패 종류를 구분해서 정의합니다.
/// 호출자가 종류별로 다르게 대응할 수 있도록 절대 하나로 합치지 않습니다.
/// (Contention만 자동 재시도 가능, 나머지는 요청 자체를 바꿔야 함)
#[derive(Error, Debug)]
pub enum CaseError {
    /// 잘못된 확률 분포 (빈 아이템 목록, 전부 가중치 0, 음수 가중치)
    /// Invalid probability distribution (empty items, all-zero or negative weights)
    #[error("Invalid prize distribution: {reason}")]
    InvalidDistribution { reason: String },

    /// 밴 당한 사용자
    /// User is banned
    #[error("User is banned: id={user_id}")]
    UserBanned { user_id: u64 },

    /// 잔고 부족
    /// Insufficient balance
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// 무료 케이스 쿨다운 중
    /// Free case is still on cooldown
    #[error("Cooldown active: {remaining_seconds}s remaining")]
    CooldownActive { remaining_seconds: i64 },

    /// 사용자 락 획득 실패 (재시도 가능)
    /// Could not acquire the per-user lock in time (retryable)
    #[error("Too many concurrent requests for this user, retry later")]
    Contention,

    /// 케이스를 찾을 수 없음
    /// Case not found
    #[error("Case not found: id={id}")]
    CaseNotFound { id: u64 },

    /// 사용자를 찾을 수 없음
    /// User not found
    #[error("User not found: id={id}")]
    UserNotFound { id: u64 },

    /// 잘못된 multiplier (0 또는 상한 초과)
    /// Invalid multiplier (zero or above the cap)
    #[error("Invalid multiplier: {multiplier} (must be 1..={max})")]
    InvalidMultiplier { multiplier: u32, max: u32 },

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl CaseError {
    /// 이 에러를 자동 재시도해도 안전한지 여부
    /// Whether the caller may safely retry automatically
    pub fn is_retryable(&self) -> bool {
        matches!(self, CaseError::Contention)
    }
}

/// CaseError를 HTTP 응답으로 변환
impl From<CaseError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: CaseError) -> Self {
        let status = match &err {
            // 케이스 설정 오류 (운영자가 고쳐야 함)
            CaseError::InvalidDistribution { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CaseError::UserBanned { .. } => StatusCode::FORBIDDEN,
            CaseError::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
            CaseError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
            CaseError::Contention => StatusCode::CONFLICT,
            CaseError::CaseNotFound { .. } | CaseError::UserNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            CaseError::InvalidMultiplier { .. } => StatusCode::BAD_REQUEST,
            CaseError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let retryable = err.is_retryable();
        (
            status,
            Json(json!({
                "error": err.to_string(),
                "retryable": retryable,
            })),
        )
    }
}
