pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod state;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use features::{allowlist, competitions, leaderboard, users, weight};
use middleware::auth::ApiKeys;
use state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up")
    ),
    tag = "health"
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Every API route plus `/health`, with request tracing.
pub fn router(state: AppState, api_keys: ApiKeys) -> Router {
    let competitions = competitions::routes::routes(api_keys.clone())
        .merge(allowlist::routes::routes(api_keys.clone()))
        .merge(leaderboard::routes::competition_routes(api_keys.clone()));

    let api = Router::new()
        .nest("/competitions", competitions)
        .nest("/leaderboard", leaderboard::routes::routes(api_keys.clone()))
        .nest("/users", users::routes::routes(api_keys.clone()))
        .nest("/weight", weight::routes::routes(api_keys));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
