//! Authentication and authorization
//!
//! - [`JwtService`] - session token signing and validation
//! - [`CurrentUser`] - staff identity decoded from the session cookie
//! - [`authenticate`] - global layer that decodes the cookie when present
//! - [`require_role`] - per-router role gate
//! - [`session`] - `jwt` cookie helpers

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod session;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{AuthFailure, authenticate, require_role};
