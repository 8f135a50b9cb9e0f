// Case domain models
// 케이스 도메인 모델

pub mod case;
pub mod opening;
pub mod user;

pub use case::*;
pub use opening::*;
pub use user::*;
