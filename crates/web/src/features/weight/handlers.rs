use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::user::{LogWeightRequest, WeightHistoryQuery},
    models::WeightEntry,
    services::users,
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/weight",
    request_body = LogWeightRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Weigh-in recorded", body = WeightEntry),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    ),
    tag = "weight"
)]
pub async fn log_weight(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<LogWeightRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let entry = users::log_weight(state.store(), user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/weight",
    params(WeightHistoryQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's weigh-ins, oldest first", body = Vec<WeightEntry>),
        (status = 404, description = "User not found")
    ),
    tag = "weight"
)]
pub async fn weight_history(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<WeightHistoryQuery>,
) -> Result<Json<Vec<WeightEntry>>, WebError> {
    let entries = users::weight_history(state.store(), user_id, query.range()).await?;

    Ok(Json(entries))
}
