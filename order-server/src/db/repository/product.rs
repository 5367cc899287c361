//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::{Sqlite, SqlitePool};

const COLUMNS: &str = "id, category_id, name, price, image, description, garnishes, is_active";

pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM products WHERE category_id = ? ORDER BY id"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

/// Look up a product on any executor (pool or open transaction)
pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Product>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let product =
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
    Ok(product)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let garnishes = serde_json::to_string(&data.garnishes)?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO products (category_id, name, price, image, description, garnishes, is_active) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.category_id)
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.image)
    .bind(&data.description)
    .bind(garnishes)
    .bind(data.is_active.unwrap_or(true))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let garnishes = data
        .garnishes
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let rows = sqlx::query(
        "UPDATE products SET category_id = COALESCE(?1, category_id), name = COALESCE(?2, name), price = COALESCE(?3, price), image = COALESCE(?4, image), description = COALESCE(?5, description), garnishes = COALESCE(?6, garnishes), is_active = COALESCE(?7, is_active) WHERE id = ?8",
    )
    .bind(data.category_id)
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.image)
    .bind(&data.description)
    .bind(garnishes)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Delete a product; returns `false` when it did not exist
///
/// Orders keep their embedded copy of the product, so nothing else is touched.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
