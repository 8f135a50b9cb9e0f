use crate::shared::errors::CaseError;

// =====================================================
// ProbabilityTable - 가중치 추첨 테이블
// =====================================================
// 역할: 케이스 아이템의 원시 가중치 목록을 추첨 가능한 분포로 변환
//
// 핵심 설계:
// 1. 입력 순서대로 prefix sum (누적 가중치) 테이블 구성
// 2. 합계 T가 100일 필요 없음 - draw 시점에 u * T로 자체 정규화
// 3. 가중치 0인 아이템은 테이블에 아예 넣지 않음
//    → 부동소수점 경계에서도 절대 당첨될 수 없음
// 4. 구간은 반열린 구간 [prev, prev + w):
//    경계값은 아래쪽 구간이 소유, 위쪽 구간은 소유하지 않음
//    → 동점은 입력 순서로 결정됨
// =====================================================

/// 누적 가중치 항목
/// One cumulative weight entry
#[derive(Debug, Clone)]
struct TableEntry {
    /// 원본 입력에서의 아이템 인덱스
    /// Index of the item in the original input
    item_index: usize,
    /// 누적 가중치 상한 (반열린 구간의 위쪽 경계)
    /// Cumulative upper bound (exclusive)
    cumulative: f64,
}

/// 가중치 추첨 테이블
/// Weighted draw table
///
/// 케이스 아이템 목록에서 만들어지는 순수 값 타입입니다.
/// 한 번 만들어지면 불변이며, 오프닝 하나(multiplier 배치 포함)는
/// 시작 시점에 만든 테이블 하나로 모든 추첨을 수행합니다.
#[derive(Debug, Clone)]
pub struct ProbabilityTable {
    entries: Vec<TableEntry>,
    total: f64,
}

impl ProbabilityTable {
    /// 가중치 목록으로 테이블 생성
    /// Build a table from a weight list
    ///
    /// # Arguments
    /// * `weights` - 입력 순서대로의 가중치 (0 이상, 합이 특정 값일 필요 없음)
    ///
    /// # Errors
    /// * `InvalidDistribution` - 목록이 비었거나, 음수 가중치가 있거나,
    ///   전부 0이거나, 유한하지 않은 값이 있는 경우
    pub fn from_weights(weights: &[f64]) -> Result<Self, CaseError> {
        if weights.is_empty() {
            return Err(CaseError::InvalidDistribution {
                reason: "item list is empty".to_string(),
            });
        }

        let mut entries = Vec::with_capacity(weights.len());
        let mut cumulative = 0.0f64;

        for (item_index, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CaseError::InvalidDistribution {
                    reason: format!("weight at index {} is negative or not finite", item_index),
                });
            }
            // 가중치 0은 테이블에서 제외 (절대 당첨 불가)
            if weight == 0.0 {
                continue;
            }
            cumulative += weight;
            entries.push(TableEntry {
                item_index,
                cumulative,
            });
        }

        if entries.is_empty() {
            return Err(CaseError::InvalidDistribution {
                reason: "all weights are zero".to_string(),
            });
        }

        Ok(Self {
            entries,
            total: cumulative,
        })
    }

    /// 총 가중치 합
    /// Total weight
    pub fn total(&self) -> f64 {
        self.total
    }

    /// 추첨 가능한 아이템 수 (가중치 > 0)
    /// Number of drawable items (positive weight)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 한 번 추첨 (순수 함수)
    /// Draw once (pure function)
    ///
    /// 같은 테이블 + 같은 u는 항상 같은 아이템을 반환합니다
    /// (테스트에서 u를 고정해 결정적으로 재현 가능).
    ///
    /// # Arguments
    /// * `u` - [0, 1) 균등분포 난수
    ///
    /// # Returns
    /// 당첨된 아이템의 원본 입력 인덱스
    pub fn draw(&self, u: f64) -> usize {
        // 호출자 계약은 u ∈ [0, 1). 범위 밖 값은 경계로 클램프.
        let u = u.clamp(0.0, 1.0 - f64::EPSILON);
        let x = u * self.total;

        // 첫 번째로 상한이 x를 초과하는 구간이 당첨
        // (x == 상한이면 다음 구간 소유 → 반열린 구간 규칙)
        for entry in &self.entries {
            if x < entry.cumulative {
                return entry.item_index;
            }
        }

        // 부동소수점 누적 오차로 x가 총합에 닿은 경우: 마지막 양수 가중치 아이템
        self.entries[self.entries.len() - 1].item_index
    }
}
