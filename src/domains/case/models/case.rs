use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

// =====================================================
// Case / CaseItem / Prize 모델
// =====================================================
// 역할: 케이스 카탈로그 데이터 모델
//
// 가중치 규칙:
// - chance는 0 이상의 실수, 합이 100일 필요 없음 (테이블이 자체 정규화)
// - 어드민이 아이템을 동시에 수정할 수 있으므로,
//   각 오프닝은 시작 시점의 스냅샷으로 추첨함
// =====================================================

/// 케이스 (구매형 또는 무료/쿨다운형)
/// Case (purchasable or free/cooldown-gated)
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = Case)]
pub struct Case {
    /// 케이스 ID
    pub id: u64,

    /// 케이스 이름
    #[schema(example = "Starter Case")]
    pub name: String,

    /// 가격 (0이면 무료 케이스, 쿨다운으로 제한)
    /// Price (zero means free, gated by cooldown)
    #[schema(value_type = String, example = "100.0")]
    pub price: Decimal,

    /// 미리보기 이미지 URL
    /// Preview image URL
    pub preview: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 케이스 아이템 (상금 참조 + 가중치)
/// Case item (prize reference + probability weight)
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = CaseItem)]
pub struct CaseItem {
    /// 아이템 ID
    pub id: u64,

    /// 소속 케이스 ID
    pub case_id: u64,

    /// 참조하는 상금 ID
    pub prize_id: u64,

    /// 가중치 (0 이상, 합이 100일 필요 없음)
    /// Weight (non-negative, need not sum to 100)
    #[schema(example = 25.0)]
    pub chance: f64,
}

/// 상금
/// Prize
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[schema(as = Prize)]
pub struct Prize {
    /// 상금 ID
    pub id: u64,

    /// 상금 이름
    #[schema(example = "Golden Star")]
    pub name: String,

    /// 상금 가치
    /// Monetary value awarded
    #[schema(value_type = String, example = "500.0")]
    pub amount: Decimal,

    /// 이미지 URL
    pub url: String,
}

/// 케이스 상세 응답 (아이템 + 상금 포함)
/// Case detail response (with items and prizes)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = CaseDetailResponse)]
pub struct CaseDetailResponse {
    pub id: u64,
    pub name: String,
    #[schema(value_type = String, example = "100.0")]
    pub price: Decimal,
    pub preview: String,
    /// 아이템 목록 (상금 정보 포함)
    pub items: Vec<CaseItemDetail>,
}

/// 케이스 아이템 상세 (상금 정보 포함)
/// Case item detail (with prize payload)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = CaseItemDetail)]
pub struct CaseItemDetail {
    pub id: u64,
    pub chance: f64,
    pub prize: Prize,
}
