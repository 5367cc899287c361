//! Data models
//!
//! Shared between the server and its HTTP clients. Rust field names are
//! English; the wire names follow the web client (`nome`, `preco`, ...).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod auth;
pub mod category;
pub mod order;
pub mod order_summary;
pub mod product;
pub mod report;
pub mod staff;

// Re-exports
pub use auth::*;
pub use category::*;
pub use order::*;
pub use order_summary::*;
pub use product::*;
pub use report::*;
pub use staff::*;
