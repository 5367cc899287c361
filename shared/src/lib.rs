//! Shared types for the order server
//!
//! Error system, domain models and small utilities used by the server and
//! by anything that talks to its HTTP API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
