//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type every HTTP handler returns:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending id, field name, ...)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }
}

/// Error response body
///
/// Successful responses return the resource JSON directly; failures use
/// this envelope so the client can switch on `code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response carrying only a message
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            message: message.into(),
            data: None,
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = match self.code {
            None | Some(0) => StatusCode::OK,
            Some(code) => ErrorCode::try_from(code)
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(ErrorCode::ProductNotFound, "Product 7 not found")
            .with_detail("product_id", 7);

        let details = err.details.unwrap();
        assert_eq!(details.get("product_id").unwrap(), 7);
    }

    #[test]
    fn test_convenience_constructors() {
        let err = AppError::not_found("Category 3");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Category 3 not found");
        assert!(err.details.as_ref().unwrap().contains_key("resource"));

        assert_eq!(AppError::validation("x").code, ErrorCode::ValidationFailed);
        assert_eq!(AppError::unauthorized().code, ErrorCode::NotAuthenticated);
        assert_eq!(AppError::forbidden("x").code, ErrorCode::PermissionDenied);
        assert_eq!(AppError::database("x").code, ErrorCode::DatabaseError);
        assert_eq!(AppError::token_expired().code, ErrorCode::TokenExpired);
        assert_eq!(AppError::conflict("x").http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_response_body() {
        let err = AppError::new(ErrorCode::OrderEmpty);
        let response = ApiResponse::<()>::error(&err);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 4007);
        assert_eq!(json["message"], "Order has no items");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = AppError::new(ErrorCode::StaffNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiResponse::<()>::ok_with_message("printed").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
