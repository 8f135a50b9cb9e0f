// Leaderboard domain module
// 리더보드 도메인 모듈
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
