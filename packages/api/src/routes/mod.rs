pub mod auth;
pub mod games;
pub mod health;
pub mod highscores;
pub mod user;
