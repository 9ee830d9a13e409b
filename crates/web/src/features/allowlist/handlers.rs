use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::{
    dto::allowlist::{AddAllowlistRequest, RemoveAllowlistRequest},
    models::AllowlistEntry,
    services::{competitions, enrollment},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/allowlist",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Emails allowed to join", body = Vec<AllowlistEntry>),
        (status = 403, description = "Only the creator or an admin can view the allowlist"),
        (status = 404, description = "Competition not found")
    ),
    tag = "allowlist"
)]
pub async fn list_allowlist(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(competition_id): Path<Uuid>,
) -> Result<Json<Vec<AllowlistEntry>>, WebError> {
    let entries =
        competitions::allowlist(state.store(), &state.policy, user_id, competition_id).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    post,
    path = "/api/competitions/{id}/allowlist",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    request_body = AddAllowlistRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Single email added; a batch returns BulkAllowlistResult instead", body = AllowlistEntry),
        (status = 400, description = "Neither email nor emails given, or invalid email"),
        (status = 403, description = "Only the creator or an admin can add emails"),
        (status = 409, description = "Email is already on the allowlist")
    ),
    tag = "allowlist"
)]
pub async fn add_to_allowlist(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(competition_id): Path<Uuid>,
    Json(req): Json<AddAllowlistRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    competitions::require_administer(state.store(), &state.policy, user_id, competition_id)
        .await?;

    if let Some(email) = &req.email {
        let entry = enrollment::add_allowlist_entry(state.store(), competition_id, email).await?;
        return Ok((StatusCode::CREATED, Json(entry)).into_response());
    }

    if let Some(emails) = &req.emails {
        let results =
            enrollment::bulk_add_allowlist_entries(state.store(), competition_id, emails).await?;
        return Ok((StatusCode::CREATED, Json(results)).into_response());
    }

    Err(WebError::BadRequest(
        "Must provide either email or emails field".to_string(),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/competitions/{id}/allowlist",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    request_body = RemoveAllowlistRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Email removed from allowlist"),
        (status = 403, description = "Only the creator or an admin can remove emails"),
        (status = 404, description = "Email not found on allowlist")
    ),
    tag = "allowlist"
)]
pub async fn remove_from_allowlist(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(competition_id): Path<Uuid>,
    Json(req): Json<RemoveAllowlistRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    competitions::require_administer(state.store(), &state.policy, user_id, competition_id)
        .await?;
    enrollment::remove_allowlist_entry(state.store(), competition_id, &req.email).await?;

    Ok(Json(json!({ "message": "Email removed from allowlist" })).into_response())
}
