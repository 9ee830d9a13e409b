use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use super::handlers::{admin_status, list_users, set_admin, signup};
use crate::middleware::auth::{require_auth, ApiKeys};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/signup", post(signup))
        .route("/me/admin", get(admin_status))
        .route("/:id/admin", put(set_admin))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
