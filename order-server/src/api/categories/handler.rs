//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, category};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

fn category_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {id} not found"))
        .with_detail("id", id)
}

fn validate_display_price(price: Option<f64>) -> AppResult<()> {
    match price {
        Some(p) => validate_price(p, "preco"),
        None => Ok(()),
    }
}

/// GET /categorias
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /categorias/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    Ok(Json(category))
}

/// POST /categorias
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_required_text(&payload.name, "nome", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "descricao", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "imagem", MAX_URL_LEN)?;
    validate_display_price(payload.display_price)?;

    let category = category::create(&state.pool, payload).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok(Json(category))
}

/// PATCH /categorias/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "nome", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "descricao", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "imagem", MAX_URL_LEN)?;
    validate_display_price(payload.display_price)?;

    let category = category::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => category_not_found(id),
            other => other.into(),
        })?;
    Ok(Json(category))
}

/// DELETE /categorias/{id}
///
/// Refused while products still point at the category.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    let products = category::count_products(&state.pool, id).await?;
    if products > 0 {
        return Err(AppError::new(ErrorCode::CategoryHasProducts).with_detail("produtos", products));
    }

    let deleted = category::delete(&state.pool, id)
        .await
        .map_err(|e| match e {
            RepoError::Validation(_) => AppError::new(ErrorCode::CategoryHasProducts),
            other => other.into(),
        })?;
    if !deleted {
        return Err(category_not_found(id));
    }

    tracing::info!(category_id = id, "Category deleted");
    Ok(ApiResponse::ok_with_message("Categoria excluída"))
}
