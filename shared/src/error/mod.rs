//! Unified error system
//!
//! - [`ErrorCode`]: Standardized numeric codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error with code, message, and optional details
//! - [`ApiResponse`]: Error envelope returned over HTTP
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::with_message(ErrorCode::ProductNotFound, "Product 42 not found")
//!     .with_detail("product_id", 42);
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(6001));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
