use crate::shared::errors::AuthError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims
///
/// 인증 서버가 발급한 토큰의 페이로드입니다.
/// 이 서버는 토큰을 검증만 하고 발급은 게이트웨이/테스트 헬퍼가 합니다.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 사용자 ID
    pub user_id: u64,
    /// 사용자 이름
    pub username: String,
    /// 만료 시각 (Unix timestamp)
    pub exp: i64,
    /// 발급 시각 (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Claims 생성
    ///
    /// # Arguments
    /// * `user_id` - 사용자 ID
    /// * `username` - 사용자 이름
    /// * `expires_in_hours` - 만료 시간 (시간 단위)
    pub fn new(user_id: u64, username: String, expires_in_hours: i64) -> Self {
        let now = chrono::Utc::now();
        Self {
            user_id,
            username,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(expires_in_hours)).timestamp(),
        }
    }
}

/// JWT 서비스
/// JWT Service for token generation and verification
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// JWT Service 생성
    /// Create JWT Service
    pub fn new(secret: String) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        Self {
            encoding_key,
            decoding_key,
        }
    }

    /// Access Token 발급 (짧은 수명)
    /// Generate Access Token (short lifetime)
    pub fn generate_access_token(
        &self,
        user_id: u64,
        username: String,
    ) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, username, 1); // 1시간 만료

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate access token: {}", e)))
    }

    /// Access Token 검증
    /// Verify Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }
}
