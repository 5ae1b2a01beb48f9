pub mod auth;
pub mod board;
pub mod leaderboard;
pub mod picks;
pub mod profile;
