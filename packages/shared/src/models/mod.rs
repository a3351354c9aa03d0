pub mod auth;
pub mod game;
pub mod highscore;
pub mod user;
