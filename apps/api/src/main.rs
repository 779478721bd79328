//! Comensales access-decision API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use comensales_core::AppError;
use comensales_infrastructure::{
    InMemoryDirectoryRepository, ResidenceTimeWindowValidator, SystemClock,
};
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let directory = match config.directory_seed_path.as_deref() {
        Some(path) => InMemoryDirectoryRepository::load_from_path(path).await?,
        None => {
            warn!("ACCESS_DIRECTORY_SEED_PATH is not set, starting with an empty directory");
            InMemoryDirectoryRepository::new()
        }
    };

    let app_state = AppState::build(
        Arc::new(directory),
        Arc::new(ResidenceTimeWindowValidator::new(SystemClock)),
        config.service_secret.clone(),
    );
    let app = api_router::build_router(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "comensales-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
