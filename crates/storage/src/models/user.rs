use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::NormalizedEmail;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Height in inches.
    pub height: f64,
    pub is_admin: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl User {
    pub fn normalized_email(&self) -> NormalizedEmail {
        NormalizedEmail::new(&self.email)
    }
}

/// Values needed to insert a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: NormalizedEmail,
    pub height: f64,
    pub is_admin: bool,
}
