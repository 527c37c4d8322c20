use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-boundary error taxonomy.
///
/// Validation failures are client errors and are raised before storage is
/// touched; storage failures are server errors. "No rows yet" is never an
/// error — handlers answer it with a null-valued placeholder or an empty
/// array instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Temperature is required")]
    MissingTemperature,
    #[error("Internal server error")]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingTemperature => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Temperature is required" })),
            )
                .into_response(),
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "storage access failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error",
                        "details": e.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::ApiError;

    #[test]
    fn missing_temperature_is_bad_request() {
        let resp = ApiError::MissingTemperature.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_error_is_internal_server_error() {
        let resp = ApiError::Storage(sqlx::Error::PoolClosed).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
