pub mod leaderboard_service;
pub mod state;

pub use leaderboard_service::LeaderboardService;
pub use state::LeaderboardState;
