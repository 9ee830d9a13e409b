use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::user::{AdminStatus, RegistrationResponse, SetAdminRequest, SignupRequest, UserResponse},
    services::{enrollment, users},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/users/signup",
    request_body = SignupRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Account created and enrolled in allowlisted competitions", body = RegistrationResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Email is neither an admin email nor on any allowlist"),
        (status = 409, description = "User with this email already exists")
    ),
    tag = "users"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let registration = enrollment::register_user(state.store(), &state.policy, &req).await?;
    let is_super_admin = state
        .policy
        .is_super_admin_email(&registration.user.normalized_email());

    let response = RegistrationResponse {
        user: UserResponse::new(registration.user, is_super_admin),
        enrolled_competitions: registration.enrolled_competitions,
        enrollment_failures: registration.enrollment_failures,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All users, newest first", body = Vec<UserResponse>),
        (status = 403, description = "Only super admins can manage users")
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<UserResponse>>, WebError> {
    let users = users::list_users(state.store(), &state.policy, user_id).await?;

    Ok(Json(users))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/admin",
    params(
        ("id" = Uuid, Path, description = "User id")
    ),
    request_body = SetAdminRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Admin status updated", body = UserResponse),
        (status = 403, description = "Caller is not a super admin, or target is a super admin or the caller"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn set_admin(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(target_id): Path<Uuid>,
    Json(req): Json<SetAdminRequest>,
) -> Result<Json<UserResponse>, WebError> {
    let user = users::set_admin(state.store(), &state.policy, user_id, target_id, req.is_admin)
        .await?;

    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/api/users/me/admin",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Effective admin flags of the caller", body = AdminStatus),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn admin_status(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<AdminStatus>, WebError> {
    let status = users::admin_status(state.store(), &state.policy, user_id).await?;

    Ok(Json(status))
}
