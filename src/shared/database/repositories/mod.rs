pub mod case_repository;
pub mod opening_repository;
pub mod user_repository;

pub use case_repository::CaseRepository;
pub use opening_repository::OpeningRepository;
pub use user_repository::UserRepository;
