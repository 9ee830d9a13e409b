use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "competition_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CompetitionStatus {
    #[default]
    Active,
    Completed,
    Draft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub competition_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    /// `None` means the competition runs through the present day.
    pub end_date: Option<NaiveDate>,
    pub status: CompetitionStatus,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
}

impl Competition {
    pub fn is_created_by(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewCompetition {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: CompetitionStatus,
    pub created_by: Uuid,
}
