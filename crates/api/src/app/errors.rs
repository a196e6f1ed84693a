use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use thiserror::Error;

use userdir_core::DomainError;
use userdir_store::StoreError;

/// Failures that escape handlers and middleware.
///
/// The `IntoResponse` impl below is the shared error path: everything that is
/// not an authorization rejection becomes a response here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Domain(e @ DomainError::Validation(_)) => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
            }
            ApiError::Domain(e @ DomainError::InvalidId(_)) => {
                json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string())
            }
            ApiError::Domain(DomainError::NotFound) => {
                json_error(StatusCode::NOT_FOUND, "not_found", "not found")
            }
            ApiError::Store(e) => {
                tracing::error!("store query failed: {e}");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    e.to_string(),
                )
            }
        }
    }
}

/// 401 rejection bodies used by the authorization middleware.
///
/// `detail` carries the verification error text when there is one.
pub fn unauthorized(message: &str, detail: Option<String>) -> axum::response::Response {
    let body = match detail {
        Some(error) => json!({ "message": message, "error": error }),
        None => json!({ "message": message }),
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
