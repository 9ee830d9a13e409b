use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{DateRange, User};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,

    /// Normalized before any check, so surrounding whitespace and casing are accepted.
    #[validate(length(min = 1, max = 255, message = "Email is required"))]
    pub email: String,

    /// Height in inches.
    #[validate(range(exclusive_min = 0.0, message = "Height must be positive"))]
    pub height: f64,
}

/// User as exposed to clients, with the derived super-admin flag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub height: f64,
    pub is_admin: bool,
    pub is_super_admin: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl UserResponse {
    pub fn new(user: User, is_super_admin: bool) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            height: user.height,
            is_admin: user.is_admin || is_super_admin,
            is_super_admin,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    pub user: UserResponse,
    /// Competitions the new account was enrolled in from allowlists.
    pub enrolled_competitions: Vec<Uuid>,
    pub enrollment_failures: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetAdminRequest {
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminStatus {
    pub is_admin: bool,
    pub is_super_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LogWeightRequest {
    pub date: NaiveDate,

    #[validate(range(exclusive_min = 0.0, message = "Weight must be positive"))]
    pub weight: f64,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct WeightHistoryQuery {
    /// First day to include.
    pub start: Option<NaiveDate>,
    /// Last day to include. Ignored without `start`.
    pub end: Option<NaiveDate>,
}

impl WeightHistoryQuery {
    pub fn range(&self) -> Option<DateRange> {
        self.start.map(|start| DateRange::new(start, self.end))
    }
}
