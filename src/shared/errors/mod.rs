// Shared errors
pub mod auth_error;
pub mod case_error;

pub use auth_error::*;
pub use case_error::*;
