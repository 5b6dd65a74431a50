pub mod game;
pub mod homepage;
pub mod layout;
pub mod leaderboard;
pub mod profile;
pub mod question;

// Re-export commonly used functions from layout
pub use layout::{page, page_with_user, render, titled};
