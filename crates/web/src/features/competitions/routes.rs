use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers::{
    available_competitions, create_competition, get_competition, join_competition,
    list_competitions, update_competition,
};
use crate::middleware::auth::{require_auth, ApiKeys};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_competitions).post(create_competition))
        .route("/available", get(available_competitions))
        .route("/:id", get(get_competition).put(update_competition))
        .route("/:id/join", post(join_competition))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
