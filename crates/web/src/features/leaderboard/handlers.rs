use axum::{
    Json,
    extract::{Path, Query, State},
};
use storage::{
    dto::leaderboard::{LeaderboardEntry, LeaderboardQuery},
    services::{competitions, leaderboard},
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Top users across all weigh-ins or the requested window, at least two entries each", body = Vec<LeaderboardEntry>)
    ),
    tag = "leaderboard"
)]
pub async fn global_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, WebError> {
    let entries = leaderboard::compute_leaderboard(state.store(), None, query.range()).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/leaderboard",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Every participant with an entry inside the competition window", body = Vec<LeaderboardEntry>),
        (status = 403, description = "Not a participant or admin"),
        (status = 404, description = "Competition not found")
    ),
    tag = "leaderboard"
)]
pub async fn competition_leaderboard(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(competition_id): Path<Uuid>,
) -> Result<Json<Vec<LeaderboardEntry>>, WebError> {
    let entries = competitions::competition_leaderboard(
        state.store(),
        &state.policy,
        user_id,
        competition_id,
    )
    .await?;

    Ok(Json(entries))
}
