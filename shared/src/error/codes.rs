//! Unified error codes for the order server
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors (products, categories)
//! - 8xxx: Staff errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the web client can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found (or not from today)
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4007,
    /// Could not reserve a daily order number
    OrderNumberConflict = 4008,

    // ==================== 6xxx: Menu ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product price is invalid
    ProductInvalidPrice = 6002,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category still has products
    CategoryHasProducts = 6102,

    // ==================== 8xxx: Staff ====================
    /// Staff account not found
    StaffNotFound = 8001,
    /// National id already registered
    StaffNationalIdExists = 8002,
    /// Staff cannot delete their own account
    StaffCannotDeleteSelf = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Printer not reachable
    PrinterNotAvailable = 9201,
    /// Print failed
    PrintFailed = 9202,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::OrderNumberConflict => "Could not reserve an order number",

            // Menu
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product price is invalid",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasProducts => "Category still has products",

            // Staff
            ErrorCode::StaffNotFound => "Staff account not found",
            ErrorCode::StaffNationalIdExists => "National id is already registered",
            ErrorCode::StaffCannotDeleteSelf => "Cannot delete your own account",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::PrinterNotAvailable => "Printer is not available",
            ErrorCode::PrintFailed => "Print operation failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),

            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderNumberConflict),

            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasProducts),

            8001 => Ok(ErrorCode::StaffNotFound),
            8002 => Ok(ErrorCode::StaffNationalIdExists),
            8003 => Ok(ErrorCode::StaffCannotDeleteSelf),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9201 => Ok(ErrorCode::PrinterNotAvailable),
            9202 => Ok(ErrorCode::PrintFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::OrderEmpty.code(), 4007);
        assert_eq!(ErrorCode::ProductNotFound.code(), 6001);
        assert_eq!(ErrorCode::CategoryHasProducts.code(), 6102);
        assert_eq!(ErrorCode::StaffNotFound.code(), 8001);
        assert_eq!(ErrorCode::PrintFailed.code(), 9202);
    }

    #[test]
    fn test_try_from_roundtrips_every_code() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::RequiredField,
            ErrorCode::ValueOutOfRange,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::PermissionDenied,
            ErrorCode::RoleRequired,
            ErrorCode::AdminRequired,
            ErrorCode::OrderNotFound,
            ErrorCode::OrderEmpty,
            ErrorCode::OrderNumberConflict,
            ErrorCode::ProductNotFound,
            ErrorCode::ProductInvalidPrice,
            ErrorCode::CategoryNotFound,
            ErrorCode::CategoryHasProducts,
            ErrorCode::StaffNotFound,
            ErrorCode::StaffNationalIdExists,
            ErrorCode::StaffCannotDeleteSelf,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::ConfigError,
            ErrorCode::PrinterNotAvailable,
            ErrorCode::PrintFailed,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(7777), Err(InvalidErrorCode(7777)));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderEmpty).unwrap();
        assert_eq!(json, "4007");
        let code: ErrorCode = serde_json::from_str("6001").unwrap();
        assert_eq!(code, ErrorCode::ProductNotFound);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }
}
