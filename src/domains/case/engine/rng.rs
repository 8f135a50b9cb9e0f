use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};

// =====================================================
// RandomSource - 난수 공급자
// =====================================================
// 역할: 추첨에 쓸 [0, 1) 균등분포 난수 공급
//
// 설계:
// - 운영에서는 OS CSPRNG 사용 (예측/재현 불가 - 베팅 공정성 요건)
// - 테스트에서는 시드 고정 StdRng로 결정적 재현
// - 언어 전역 난수 생성기에 의존하지 않고 주입 가능한 seam으로 추상화
// =====================================================

/// 난수 공급자 인터페이스
/// Random value provider interface
///
/// 추첨 하나는 독립적으로 생성된 난수 하나와 케이스 스냅샷의
/// 순수 함수이므로, 난수 생성은 다른 어떤 것과도 직렬화할 필요가 없습니다.
pub trait RandomSource: Send + Sync {
    /// [0, 1) 균등분포 난수 하나 생성
    /// Produce one uniform value in [0, 1)
    fn next_unit(&mut self) -> f64;
}

/// 운영용 난수 공급자 (OS CSPRNG)
/// Production random source (OS CSPRNG)
///
/// rand의 `gen::<f64>()`는 [0, 1) 균등분포를 보장합니다.
pub struct OsRandom;

impl OsRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OsRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for OsRandom {
    fn next_unit(&mut self) -> f64 {
        OsRng.r#gen::<f64>()
    }
}

/// 테스트/재현용 시드 고정 난수 공급자
/// Seeded random source for deterministic replay in tests
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// 미리 정한 값을 순서대로 반환하는 공급자 (단위 테스트용)
/// Returns a fixed sequence of values (for unit tests)
pub struct FixedRandom {
    values: Vec<f64>,
    index: usize,
}

impl FixedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "FixedRandom needs at least one value");
        Self { values, index: 0 }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
