//! Leaderboard computation, access control and enrollment on top of a [`Store`](crate::Store).

pub mod access;
pub mod bmi;
pub mod competitions;
pub mod enrollment;
pub mod leaderboard;
pub mod series;
pub mod users;
