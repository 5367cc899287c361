//! Utility module
//!
//! - [`AppError`] / [`AppResult`] (re-exported from `shared::error`)
//! - business clock and date helpers
//! - input validation limits
//! - money conversion between storage `f64` and `Decimal`

pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
