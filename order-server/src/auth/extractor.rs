//! CurrentUser extractor
//!
//! Reads the identity decoded by [`authenticate`](super::authenticate). Use
//! it in handlers behind [`require_role`](super::require_role) or on routes
//! that only need "some staff member".

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{AuthFailure, CurrentUser};
use crate::utils::AppError;

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }
        match parts.extensions.get::<AuthFailure>() {
            Some(failure) => Err((*failure).into()),
            None => Err(AppError::unauthorized()),
        }
    }
}
