use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use comensales_core::AppError;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::ApiResult;
use crate::state::AppState;

pub const SERVICE_SECRET_HEADER: &str = "x-comensales-service-secret";

pub async fn require_service_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let provided = request
        .headers()
        .get(SERVICE_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !secrets_match(provided.as_bytes(), state.service_secret.as_bytes()) {
        warn!(
            path = %request.uri().path(),
            "rejected internal request with invalid service credentials"
        );
        return Err(AppError::Unauthorized("invalid service credentials".to_owned()).into());
    }

    Ok(next.run(request).await)
}

fn secrets_match(provided: &[u8], expected: &[u8]) -> bool {
    provided.ct_eq(expected).into()
}
