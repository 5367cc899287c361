//! Authentication Handlers
//!
//! Login doubles as the customer "identify yourself" step: credentials that
//! do not match a staff account are not an error, they just mean the
//! caller is a customer. Only staff get a session cookie.

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use shared::models::{LoginRequest, SessionUser};
use shared::util::non_blank;

use crate::auth::CurrentUser;
use crate::auth::session::{clear_cookie, session_cookie};
use crate::core::ServerState;
use crate::db::repository::staff;
use crate::security_log;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

fn required(value: Option<String>, field: &str, max_len: usize) -> AppResult<String> {
    let value = non_blank(value).ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    })?;
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!("{field} is too long (max {max_len})")));
    }
    Ok(value)
}

/// POST /auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Response> {
    let name = required(req.name, "nome", MAX_NAME_LEN)?;
    let phone = required(req.phone, "telefone", MAX_SHORT_TEXT_LEN)?;

    let account = match staff::find_credentials(&state.pool, &name).await? {
        Some(c) if c.verify_password(&phone) => Some(c.account),
        Some(c) => {
            security_log!("WARN", "login_failed", staff_id = c.account.id);
            None
        }
        None => None,
    };
    let Some(account) = account else {
        return Ok(Json(SessionUser::customer(name, phone)).into_response());
    };

    let jwt = state.get_jwt_service();
    let token = jwt
        .generate_token(account.id, &account.name, &account.phone, account.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;
    let cookie = session_cookie(&token, jwt.session_max_age_secs(), state.config.is_production());

    security_log!(
        "INFO",
        "login_success",
        staff_id = account.id,
        role = account.role.as_str()
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionUser {
            role: account.role.as_str().to_string(),
            name: account.name,
            phone: account.phone,
        }),
    )
        .into_response())
}

/// GET /auth/profile
pub async fn profile(user: CurrentUser) -> Json<SessionUser> {
    Json(SessionUser {
        role: user.role.as_str().to_string(),
        name: user.name,
        phone: user.phone,
    })
}

/// POST /auth/logout
pub async fn logout(State(state): State<ServerState>, user: CurrentUser) -> impl IntoResponse {
    security_log!("INFO", "logout", staff_id = user.id);
    (
        [(header::SET_COOKIE, clear_cookie(state.config.is_production()))],
        ApiResponse::ok_with_message("Logout realizado"),
    )
}
