use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Pre-approved email for a competition. Checked on signup and join, never
/// removed by enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AllowlistEntry {
    pub entry_id: Uuid,
    pub competition_id: Uuid,
    pub email: String,
    pub created_at: chrono::NaiveDateTime,
}
