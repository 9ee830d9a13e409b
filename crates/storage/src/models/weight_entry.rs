use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A single weigh-in. Several entries may share a date; `entry_id` grows with
/// insertion order and breaks same-date ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WeightEntry {
    pub entry_id: i64,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewWeightEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight: f64,
    pub notes: Option<String>,
}
