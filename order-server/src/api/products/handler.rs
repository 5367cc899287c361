//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, category, product};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
    validate_price, validate_required_text, validate_text_list,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

fn product_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
        .with_detail("id", id)
}

async fn ensure_category(state: &ServerState, category_id: i64) -> AppResult<()> {
    if category::find_by_id(&state.pool, category_id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category {category_id} not found"),
        )
        .with_detail("categoria_id", category_id));
    }
    Ok(())
}

/// GET /produtos/{categoriaId}
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_by_category(&state.pool, category_id).await?;
    Ok(Json(products))
}

/// POST /produtos
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "nome", MAX_NAME_LEN)?;
    validate_price(payload.price, "preco")?;
    validate_optional_text(&payload.description, "descricao", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "imagem", MAX_URL_LEN)?;
    validate_text_list(&payload.garnishes, "acompanhamentos", MAX_SHORT_TEXT_LEN)?;
    ensure_category(&state, payload.category_id).await?;

    let product = product::create(&state.pool, payload).await?;
    tracing::info!(
        product_id = product.id,
        name = %product.name,
        price = product.price,
        "Product created"
    );
    Ok(Json(product))
}

/// PATCH /produtos/{id}
///
/// Price changes only affect future orders.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "nome", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price, "preco")?;
    }
    validate_optional_text(&payload.description, "descricao", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image, "imagem", MAX_URL_LEN)?;
    if let Some(garnishes) = &payload.garnishes {
        validate_text_list(garnishes, "acompanhamentos", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(category_id) = payload.category_id {
        ensure_category(&state, category_id).await?;
    }

    let product = product::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => product_not_found(id),
            other => other.into(),
        })?;
    tracing::info!(product_id = id, price = product.price, "Product updated");
    Ok(Json(product))
}

/// DELETE /produtos/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    if !product::delete(&state.pool, id).await? {
        return Err(product_not_found(id));
    }
    tracing::info!(product_id = id, "Product deleted");
    Ok(ApiResponse::ok_with_message("Produto excluído"))
}
