//! Daily Order Summary Repository
//!
//! Rows are written once per order and never updated or deleted.

use super::RepoResult;
use shared::models::{Order, OrderSummary, SummaryItem};
use sqlx::{Sqlite, SqlitePool};

const COLUMNS: &str = "id, order_id, order_number, summary_date, total_value, items, created_at";

/// Which summaries a report reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryFilter {
    All,
    /// Exactly one business date (YYYY-MM-DD)
    Date(String),
    /// Created at or after the given Unix millis
    Since(i64),
}

/// Compact items kept in a summary: name, quantity, unit price
pub fn summary_items(order: &Order) -> Vec<SummaryItem> {
    order
        .items
        .iter()
        .map(|item| SummaryItem {
            product_name: item.name.clone(),
            quantity: item.quantity,
            price: item.unit_price,
        })
        .collect()
}

/// Insert the summary for `order` unless one already exists
///
/// Returns `true` when a row was written.
pub async fn insert_if_absent<'e, E>(
    executor: E,
    order: &Order,
    summary_date: &str,
    now: i64,
) -> RepoResult<bool>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let items = serde_json::to_string(&summary_items(order))?;
    let result = sqlx::query(
        "INSERT INTO order_summaries (order_id, order_number, summary_date, total_value, items, created_at) VALUES (?, ?, ?, ?, ?, ?) ON CONFLICT(order_id) DO NOTHING",
    )
    .bind(order.id)
    .bind(order.order_number)
    .bind(summary_date)
    .bind(order.total)
    .bind(items)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn find_by_order_id(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderSummary>> {
    let rows = sqlx::query_as::<_, OrderSummary>(&format!(
        "SELECT {COLUMNS} FROM order_summaries WHERE order_id = ?"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list(pool: &SqlitePool, filter: &SummaryFilter) -> RepoResult<Vec<OrderSummary>> {
    let rows = match filter {
        SummaryFilter::All => {
            sqlx::query_as::<_, OrderSummary>(&format!(
                "SELECT {COLUMNS} FROM order_summaries ORDER BY summary_date, id"
            ))
            .fetch_all(pool)
            .await?
        }
        SummaryFilter::Date(date) => {
            sqlx::query_as::<_, OrderSummary>(&format!(
                "SELECT {COLUMNS} FROM order_summaries WHERE summary_date = ? ORDER BY id"
            ))
            .bind(date)
            .fetch_all(pool)
            .await?
        }
        SummaryFilter::Since(millis) => {
            sqlx::query_as::<_, OrderSummary>(&format!(
                "SELECT {COLUMNS} FROM order_summaries WHERE created_at >= ? ORDER BY summary_date, id"
            ))
            .bind(millis)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}
