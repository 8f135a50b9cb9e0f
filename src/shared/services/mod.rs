pub mod app_state;
pub mod jwt_service;

pub use app_state::AppState;
pub use jwt_service::{Claims, JwtService};
