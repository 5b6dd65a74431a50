pub mod game;
pub mod homepage;
pub mod leaderboard;
pub mod profile;
pub mod question;
