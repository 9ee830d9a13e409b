use axum::{middleware, routing::get, Router};

use super::handlers::{add_to_allowlist, list_allowlist, remove_from_allowlist};
use crate::middleware::auth::{require_auth, ApiKeys};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route(
            "/:id/allowlist",
            get(list_allowlist)
                .post(add_to_allowlist)
                .delete(remove_from_allowlist),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
