//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::ProductNotFound
            | Self::CategoryNotFound
            | Self::StaffNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::OrderNumberConflict
            | Self::CategoryHasProducts
            | Self::StaffNationalIdExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleRequired
            | Self::AdminRequired
            | Self::StaffCannotDeleteSelf => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (operator can retry)
            Self::PrinterNotAvailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::PrintFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ProductNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::StaffNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(ErrorCode::AlreadyExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::CategoryHasProducts.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::StaffNationalIdExists.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_auth_status() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::TokenExpired.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ErrorCode::AdminRequired.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_system_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::PrinterNotAvailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::PrintFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::OrderEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::ProductInvalidPrice.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
