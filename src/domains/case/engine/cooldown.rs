use chrono::{DateTime, Duration, Utc};

// =====================================================
// Cooldown - 무료 케이스 쿨다운 계산
// =====================================================
// 역할: (user, case) 쌍의 마지막 무료 오프닝 시각으로부터
//       남은 대기 시간을 계산
//
// 규칙:
// - 레코드가 없으면 바로 열 수 있음 (첫 무료 오프닝)
// - remaining = max(0, last_opened_at + interval - now)
// - 쿨다운 마킹은 오프닝 커밋과 같은 원자적 단위에서 수행됨
//   (여기는 순수 계산만 담당)
// =====================================================

/// 쿨다운 상태
/// Cooldown status
#[derive(Debug, Clone)]
pub struct CooldownStatus {
    /// 지금 열 수 있는지 여부
    pub ready: bool,
    /// 남은 대기 시간 (ready면 0)
    pub remaining: Duration,
}

impl CooldownStatus {
    /// 남은 시간 (초)
    pub fn remaining_seconds(&self) -> i64 {
        self.remaining.num_seconds()
    }
}

/// 쿨다운 상태 계산 (순수 함수)
/// Evaluate cooldown status (pure function)
///
/// # Arguments
/// * `last_opened_at` - 마지막 무료 오프닝 시각 (없으면 None)
/// * `interval` - 쿨다운 간격
/// * `now` - 현재 시각
pub fn evaluate(
    last_opened_at: Option<DateTime<Utc>>,
    interval: Duration,
    now: DateTime<Utc>,
) -> CooldownStatus {
    let Some(last) = last_opened_at else {
        return CooldownStatus {
            ready: true,
            remaining: Duration::zero(),
        };
    };

    let remaining = last + interval - now;
    if remaining <= Duration::zero() {
        CooldownStatus {
            ready: true,
            remaining: Duration::zero(),
        }
    } else {
        CooldownStatus {
            ready: false,
            remaining,
        }
    }
}
