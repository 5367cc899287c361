//! Staff API Handlers
//!
//! Password hashes are written by the repository and never read back here.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{StaffAccount, StaffCreate, StaffUpdate};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, staff};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

fn staff_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::StaffNotFound, format!("Staff {id} not found"))
        .with_detail("id", id)
}

fn map_repo_error(id: Option<i64>, err: RepoError) -> AppError {
    match (err, id) {
        (RepoError::Duplicate(_), _) => AppError::new(ErrorCode::StaffNationalIdExists),
        (RepoError::NotFound(_), Some(id)) => staff_not_found(id),
        (other, _) => other.into(),
    }
}

/// GET /usuario
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StaffAccount>>> {
    let accounts = staff::find_all(&state.pool).await?;
    Ok(Json(accounts))
}

/// GET /usuario/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StaffAccount>> {
    let account = staff::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| staff_not_found(id))?;
    Ok(Json(account))
}

/// POST /usuario
pub async fn create(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<StaffAccount>> {
    validate_required_text(&payload.name, "nome", MAX_NAME_LEN)?;
    validate_required_text(&payload.national_id, "cpf", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.phone, "telefone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.password, "senha", MAX_PASSWORD_LEN)?;

    let account = staff::create(&state.pool, payload, now_millis())
        .await
        .map_err(|e| map_repo_error(None, e))?;

    security_log!(
        "INFO",
        "staff_created",
        staff_id = account.id,
        role = account.role.as_str(),
        by = admin.id
    );
    Ok(Json(account))
}

/// PUT /usuario/{id}
pub async fn update(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<StaffAccount>> {
    if payload.is_empty() {
        return Err(AppError::validation("Update must change at least one field"));
    }
    if let Some(name) = &payload.name {
        validate_required_text(name, "nome", MAX_NAME_LEN)?;
    }
    if let Some(national_id) = &payload.national_id {
        validate_required_text(national_id, "cpf", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(phone) = &payload.phone {
        validate_required_text(phone, "telefone", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(password) = &payload.password {
        validate_required_text(password, "senha", MAX_PASSWORD_LEN)?;
    }

    let password_changed = payload.password.is_some();
    let account = staff::update(&state.pool, id, payload)
        .await
        .map_err(|e| map_repo_error(Some(id), e))?;

    security_log!(
        "INFO",
        "staff_updated",
        staff_id = id,
        password_changed = password_changed,
        by = admin.id
    );
    Ok(Json(account))
}

/// DELETE /usuario/{id}
pub async fn delete(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    if admin.id == id {
        return Err(AppError::new(ErrorCode::StaffCannotDeleteSelf));
    }
    if !staff::delete(&state.pool, id).await? {
        return Err(staff_not_found(id));
    }

    security_log!("INFO", "staff_deleted", staff_id = id, by = admin.id);
    Ok(ApiResponse::ok_with_message("Usuário excluído"))
}
