use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{Band, DateRange};

/// Optional window for the global leaderboard.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// First day to include.
    pub start: Option<NaiveDate>,
    /// Last day to include. Ignored without `start`.
    pub end: Option<NaiveDate>,
}

impl LeaderboardQuery {
    pub fn range(&self) -> Option<DateRange> {
        self.start.map(|start| DateRange::new(start, self.end))
    }
}

/// One ranked row of a leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    /// 1-based position after sorting.
    pub rank: usize,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub height: f64,
    pub first_weight: f64,
    pub latest_weight: f64,
    pub first_index: f64,
    pub latest_index: f64,
    /// Positive when the index went down.
    pub index_change: f64,
    /// Positive when weight was lost.
    pub weight_change: f64,
    pub observation_count: usize,
    pub improvement_score: f64,
    pub latest_band: Band,
}
