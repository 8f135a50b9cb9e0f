use anyhow::{Context, Result};
use rust_decimal::Decimal;

// 텔레그램 알림 클라이언트
// Telegram notification client
// 역할: 고액 당첨/오프닝을 운영 채널에 알림
pub struct TelegramClient {
    http_client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    /// 환경변수에서 클라이언트 생성
    /// Create client from environment
    ///
    /// TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID가 없으면 None
    /// (알림 비활성 - 로컬/테스트 환경)
    pub fn from_env() -> Result<Option<Self>> {
        let bot_token = match std::env::var("TELEGRAM_BOT_TOKEN") {
            Ok(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };
        let chat_id = match std::env::var("TELEGRAM_CHAT_ID") {
            Ok(id) if !id.is_empty() => id,
            _ => return Ok(None),
        };

        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Some(Self {
            http_client,
            bot_token,
            chat_id,
        }))
    }

    /// 오프닝 알림 전송
    /// Send an opening notification
    ///
    /// 실패해도 오프닝 자체에는 영향 없음 (호출자가 fire-and-forget으로 spawn)
    pub async fn notify_opening(
        &self,
        username: &str,
        case_name: &str,
        total_won: Decimal,
        spins: usize,
    ) -> Result<()> {
        let text = format!(
            "🎁 {} opened {} x{} and won {}",
            username, case_name, spins, total_won
        );

        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
            }))
            .send()
            .await
            .context("Failed to send Telegram notification")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Telegram API returned error: {} - {}", status, body);
        }

        Ok(())
    }
}
