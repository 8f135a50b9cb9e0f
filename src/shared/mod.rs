// Shared module
pub mod clients;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;

pub use clients::*;
pub use database::*;
pub use errors::*;
pub use middleware::*;
pub use services::*;
