//! Authentication middleware
//!
//! Public and staff-only handlers share paths (`GET /pedidos/{n}` is public,
//! `PATCH /pedidos/{n}` is not), so decoding and gating are split:
//!
//! - [`authenticate`] runs on every request. It never rejects; it decodes
//!   the `jwt` cookie when present and stores either a [`CurrentUser`] or an
//!   [`AuthFailure`] in the request extensions.
//! - [`require_role`] is layered onto staff-only routers and turns a missing
//!   or failed session into 401 and a wrong role into 403.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::models::StaffRole;

use crate::auth::session::token_from_cookies;
use crate::auth::{CurrentUser, JwtError};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

/// Why a presented session cookie was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    Expired,
    Invalid,
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::Expired => AppError::token_expired(),
            AuthFailure::Invalid => AppError::invalid_token("Invalid session token"),
        }
    }
}

/// Decode the session cookie, if any
pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = token_from_cookies(req.headers()) {
        match state
            .jwt_service
            .validate_token(&token)
            .and_then(CurrentUser::try_from)
        {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = format!("{}", e),
                    uri = format!("{:?}", req.uri())
                );
                let failure = match e {
                    JwtError::ExpiredToken => AuthFailure::Expired,
                    _ => AuthFailure::Invalid,
                };
                req.extensions_mut().insert(failure);
            }
        }
    }

    next.run(req).await
}

/// Staff session required for this request
fn session_user(req: &Request) -> Result<&CurrentUser, AppError> {
    if let Some(user) = req.extensions().get::<CurrentUser>() {
        return Ok(user);
    }
    match req.extensions().get::<AuthFailure>() {
        Some(failure) => Err((*failure).into()),
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            Err(AppError::unauthorized())
        }
    }
}

/// Role gate: require a staff session with one of `allowed`
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/", get(handler::list))
///     .layer(middleware::from_fn(require_role(&[StaffRole::Admin, StaffRole::Cozinha])));
/// ```
pub fn require_role(
    allowed: &'static [StaffRole],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = session_user(&req)?;

            if !user.has_role(allowed) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id,
                    user_role = user.role.as_str()
                );
                let code = if allowed == ADMIN_ONLY {
                    ErrorCode::AdminRequired
                } else {
                    ErrorCode::RoleRequired
                };
                return Err(AppError::new(code));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Roles allowed on kitchen-facing order routes
pub const KITCHEN_ROLES: &[StaffRole] = &[StaffRole::Admin, StaffRole::Cozinha];

/// Admin-only routes
pub const ADMIN_ONLY: &[StaffRole] = &[StaffRole::Admin];
