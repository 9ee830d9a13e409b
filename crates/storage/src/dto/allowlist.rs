use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Either a single `email` or a batch of `emails`.
///
/// Addresses are checked after normalization by the allowlist service, the
/// same way for both shapes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddAllowlistRequest {
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Email array is empty"))]
    pub emails: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RemoveAllowlistRequest {
    #[validate(length(min = 1, message = "Valid email is required"))]
    pub email: String,
}

/// Outcome of a bulk allowlist insert. Per-email failures never abort the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BulkAllowlistResult {
    pub added: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}
