//! Order Repository
//!
//! Orders are addressed by `(business_date, order_number)`. Functions that
//! take an executor run on either the pool or an open transaction.

use super::{RepoError, RepoResult};
use shared::models::{
    DeliveryMode, Order, OrderLineItem, OrderStatus, OrderUpdate, PaymentMethod,
};
use sqlx::{Sqlite, SqlitePool};

const COLUMNS: &str = "id, order_number, customer_name, customer_contact, items, total, status, delivery, address, payment_method, is_paid, business_date, created_at";

/// Fully priced order ready to persist (the number is assigned on insert)
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub business_date: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub items: Vec<OrderLineItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub delivery: DeliveryMode,
    pub address: Option<String>,
    pub payment_method: PaymentMethod,
    pub created_at: i64,
}

/// Insert an order with the next free number of its business day
///
/// Reading the highest number and inserting happen in one statement, so
/// SQLite's write lock covers both. Numbers stay unique after deletions
/// because the next one follows the highest, not the count. A clash with
/// the UNIQUE(business_date, order_number) index surfaces as
/// `RepoError::Duplicate`. Returns `(id, order_number)`.
pub async fn insert_next_number<'e, E>(executor: E, order: &NewOrder) -> RepoResult<(i64, i64)>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let items = serde_json::to_string(&order.items)?;
    let row: (i64, i64) = sqlx::query_as(
        "INSERT INTO orders (order_number, business_date, customer_name, customer_contact, items, total, status, delivery, address, payment_method, is_paid, created_at) \
         SELECT COALESCE(MAX(order_number), 0) + 1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10 FROM orders WHERE business_date = ?1 \
         RETURNING id, order_number",
    )
    .bind(&order.business_date)
    .bind(&order.customer_name)
    .bind(&order.customer_contact)
    .bind(items)
    .bind(order.total)
    .bind(order.status)
    .bind(order.delivery)
    .bind(&order.address)
    .bind(order.payment_method)
    .bind(order.created_at)
    .fetch_one(executor)
    .await?;
    Ok(row)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Order>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(order)
}

pub async fn find_by_number<'e, E>(
    executor: E,
    business_date: &str,
    order_number: i64,
) -> RepoResult<Option<Order>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE business_date = ? AND order_number = ?"
    ))
    .bind(business_date)
    .bind(order_number)
    .fetch_optional(executor)
    .await?;
    Ok(order)
}

/// All orders of a business day, newest first
pub async fn list_for_date(pool: &SqlitePool, business_date: &str) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE business_date = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(business_date)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// A customer's full history across all days, newest first
pub async fn list_by_contact(pool: &SqlitePool, contact: &str) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE customer_contact = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(contact)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Apply an allow-listed update; `NotFound` when no order matches
pub async fn update_fields<'e, E>(
    executor: E,
    business_date: &str,
    order_number: i64,
    data: &OrderUpdate,
) -> RepoResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE orders SET status = COALESCE(?1, status), is_paid = COALESCE(?2, is_paid), delivery = COALESCE(?3, delivery), address = COALESCE(?4, address) WHERE business_date = ?5 AND order_number = ?6",
    )
    .bind(data.status)
    .bind(data.is_paid)
    .bind(data.delivery)
    .bind(&data.address)
    .bind(business_date)
    .bind(order_number)
    .execute(executor)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Order {order_number} not found for {business_date}"
        )));
    }
    Ok(())
}

/// Delete one order of a business day; returns `false` when none matched
pub async fn delete_by_number(
    pool: &SqlitePool,
    business_date: &str,
    order_number: i64,
) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE business_date = ? AND order_number = ?")
        .bind(business_date)
        .bind(order_number)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
