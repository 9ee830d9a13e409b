use axum::{middleware, routing::get, Router};

use super::handlers::{log_weight, weight_history};
use crate::middleware::auth::{require_auth, ApiKeys};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(weight_history).post(log_weight))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
