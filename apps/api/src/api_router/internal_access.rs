use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::post;

use crate::state::AppState;
use crate::{handlers, middleware};

pub(super) fn build_internal_access_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/internal/access/management",
            post(handlers::access::management_access_handler),
        )
        .route(
            "/api/internal/access/assisted-user",
            post(handlers::access::assisted_user_access_handler),
        )
        .route_layer(from_fn_with_state(
            app_state,
            middleware::require_service_auth,
        ))
}
