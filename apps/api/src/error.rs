use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use comensales_core::AppError;
use serde::Serialize;
use tracing::error;
use ts_rs::TS;

/// Error body returned to internal callers.
///
/// `code` is stable across releases; `message` is for humans and omits the
/// details of internal failures.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    code: String,
    message: String,
}

/// HTTP error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if let AppError::Internal(_) = self.0 {
            error!(error = %self.0, "access check failed");
            "internal error".to_owned()
        } else {
            self.0.to_string()
        };

        let payload = Json(ErrorResponse {
            code: code.to_owned(),
            message,
        });

        (status, payload).into_response()
    }
}

/// Result type of every handler.
pub type ApiResult<T> = Result<T, ApiError>;
