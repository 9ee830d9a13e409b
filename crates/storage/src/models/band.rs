use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Qualitative body-mass category derived from an index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    Underweight,
    Normal,
    Overweight,
    Obese,
}
