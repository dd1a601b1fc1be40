//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a `{"error": message}` JSON
//! body, so every handler fails the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use framed_core::errors::FramedError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use framed_api::middleware::error_handling::AppError;
/// use framed_core::errors::FramedError;
///
/// async fn handler(code: String) -> Result<Json<String>, AppError> {
///     if code.len() != 8 {
///         return Err(AppError(FramedError::NotFound(format!("Booking {} not found", code))));
///     }
///     Ok(Json(code))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub FramedError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            FramedError::NotFound(_) => StatusCode::NOT_FOUND,
            FramedError::Validation(_) => StatusCode::BAD_REQUEST,
            FramedError::Authentication(_) => StatusCode::UNAUTHORIZED,
            FramedError::Authorization(_) => StatusCode::FORBIDDEN,
            FramedError::Delivery(_) => StatusCode::BAD_GATEWAY,
            FramedError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FramedError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage details stay in the log.
        let message = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            tracing::error!("Request failed: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Automatic conversion from FramedError to AppError
impl From<FramedError> for AppError {
    fn from(err: FramedError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `FramedError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(FramedError::Database(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (FramedError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (FramedError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (FramedError::Authentication("x".into()), StatusCode::UNAUTHORIZED),
            (FramedError::Authorization("x".into()), StatusCode::FORBIDDEN),
            (FramedError::Delivery("x".into()), StatusCode::BAD_GATEWAY),
            (FramedError::Database(eyre::eyre!("x")), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(AppError(error).into_response().status(), expected);
        }
    }
}
