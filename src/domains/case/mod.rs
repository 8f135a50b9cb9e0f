// Case domain module
// 케이스 도메인 모듈
pub mod engine;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
