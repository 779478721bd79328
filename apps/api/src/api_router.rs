use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod internal_access;


pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(internal_access::build_internal_access_routes(
            app_state.clone(),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
