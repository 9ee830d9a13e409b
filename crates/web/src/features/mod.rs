pub mod allowlist;
pub mod competitions;
pub mod leaderboard;
pub mod users;
pub mod weight;
