pub mod case_service;
pub mod state;

pub use case_service::CaseService;
pub use state::CaseState;
