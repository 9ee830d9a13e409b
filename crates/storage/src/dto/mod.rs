pub mod allowlist;
pub mod competition;
pub mod leaderboard;
pub mod user;
