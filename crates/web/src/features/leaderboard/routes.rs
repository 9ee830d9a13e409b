use axum::{middleware, routing::get, Router};

use super::handlers::{competition_leaderboard, global_leaderboard};
use crate::middleware::auth::{require_auth, ApiKeys};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(global_leaderboard))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}

/// Mounted under `/competitions`.
pub fn competition_routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/:id/leaderboard", get(competition_leaderboard))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
