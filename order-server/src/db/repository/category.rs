//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, image, display_price, is_active";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM categories ORDER BY id"))
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category =
        sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM categories WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO categories (name, description, image, display_price, is_active) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.display_price)
    .bind(data.is_active.unwrap_or(true))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let rows = sqlx::query(
        "UPDATE categories SET name = COALESCE(?1, name), description = COALESCE(?2, description), image = COALESCE(?3, image), display_price = COALESCE(?4, display_price), is_active = COALESCE(?5, is_active) WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.display_price)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Number of products (active or not) still referencing the category
pub async fn count_products(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Delete a category; returns `false` when it did not exist
///
/// Callers check [`count_products`] first; the foreign key rejects the
/// delete anyway if a product slips in between.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn sample(name: &str) -> CategoryCreate {
        CategoryCreate {
            name: name.into(),
            description: Some("Pratos do dia".into()),
            image: None,
            display_price: Some(18.0),
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_id_order() {
        let db = DbService::in_memory().await.unwrap();
        let first = create(&db.pool, sample("Marmitas")).await.unwrap();
        let second = create(&db.pool, sample("Bebidas")).await.unwrap();
        assert!(first.is_active);

        let all = find_all(&db.pool).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let db = DbService::in_memory().await.unwrap();
        let created = create(&db.pool, sample("Marmitas")).await.unwrap();
        let updated = update(
            &db.pool,
            created.id,
            CategoryUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Marmitas");
        assert_eq!(updated.display_price, Some(18.0));
        assert!(!updated.is_active);

        let missing = update(&db.pool, 999, CategoryUpdate::default()).await;
        assert!(matches!(missing, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = DbService::in_memory().await.unwrap();
        let created = create(&db.pool, sample("Sobremesas")).await.unwrap();
        assert_eq!(count_products(&db.pool, created.id).await.unwrap(), 0);
        assert!(delete(&db.pool, created.id).await.unwrap());
        assert!(!delete(&db.pool, created.id).await.unwrap());
    }
}
