// Library root (integration tests use this crate as a lib)
// 라이브러리 루트 (통합 테스트가 이 크레이트를 lib으로 사용)
pub mod domains;
pub mod routes;
pub mod shared;
