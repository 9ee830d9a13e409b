use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::competition::{
        CompetitionDetailResponse, CreateCompetitionRequest, ListCompetitionsQuery,
        UpdateCompetitionRequest,
    },
    models::{Competition, CompetitionParticipant},
    services::{competitions, enrollment},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/competitions",
    params(ListCompetitionsQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competitions the user participates in, or all of them for admins with ?all=true", body = Vec<Competition>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<ListCompetitionsQuery>,
) -> Result<Json<Vec<Competition>>, WebError> {
    let competitions =
        competitions::list_competitions(state.store(), &state.policy, user_id, query.all).await?;

    Ok(Json(competitions))
}

#[utoipa::path(
    get,
    path = "/api/competitions/available",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Allowlisted competitions the user has not joined yet", body = Vec<Competition>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "competitions"
)]
pub async fn available_competitions(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<Competition>>, WebError> {
    let competitions =
        competitions::available_competitions(state.store(), &state.policy, user_id).await?;

    Ok(Json(competitions))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competition with participants and leaderboard", body = CompetitionDetailResponse),
        (status = 403, description = "Not a participant or admin"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(competition_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail =
        competitions::get_competition(state.store(), &state.policy, user_id, competition_id)
            .await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions",
    request_body = CreateCompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Competition created successfully", body = Competition),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only admins can create competitions")
    ),
    tag = "competitions"
)]
pub async fn create_competition(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateCompetitionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_dates()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let competition =
        competitions::create_competition(state.store(), &state.policy, user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(competition)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/competitions/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    request_body = UpdateCompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competition updated successfully", body = Competition),
        (status = 400, description = "Validation error or no fields to update"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the creator or an admin can update"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn update_competition(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(competition_id): Path<Uuid>,
    Json(update_req): Json<UpdateCompetitionRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = competitions::update_competition(
        state.store(),
        &state.policy,
        user_id,
        competition_id,
        &update_req,
    )
    .await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions/{id}/join",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Joined the competition", body = CompetitionParticipant),
        (status = 403, description = "Not allowlisted and not an admin"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Already participating")
    ),
    tag = "competitions"
)]
pub async fn join_competition(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(competition_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let participant =
        enrollment::join_competition(state.store(), &state.policy, competition_id, user_id)
            .await?;

    Ok((StatusCode::CREATED, Json(participant)).into_response())
}
