pub mod auth_service;
pub mod errors;
pub mod game_rules;
pub mod game_service;
pub mod grid;
pub mod leaderboard_service;
pub mod user_service;
