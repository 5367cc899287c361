//! Order lifecycle
//!
//! Every operation takes the business date (and, where rows are written,
//! the current time) from the caller, so "today" is decided once per
//! request by the API layer.

use std::collections::HashMap;

use shared::ErrorCode;
use shared::models::{DeliveryMode, Order, OrderCreate, OrderStatus, OrderUpdate, Product};
use sqlx::SqlitePool;

use crate::db::repository::order::{self as order_repo, NewOrder};
use crate::db::repository::{RepoError, order_summary, product};
use crate::orders::pricing::price_order;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_quantity, validate_required_text, validate_text_list,
};
use crate::utils::{AppError, AppResult};

/// Attempts to reserve a daily number before giving up
const MAX_NUMBERING_ATTEMPTS: usize = 3;

fn order_not_found(order_number: i64) -> AppError {
    AppError::with_message(
        ErrorCode::OrderNotFound,
        format!("Order {order_number} not found"),
    )
    .with_detail("numero_pedido", order_number)
}

fn validate_create(payload: &OrderCreate) -> AppResult<()> {
    validate_required_text(&payload.customer_name, "nome_cliente", MAX_NAME_LEN)?;
    validate_required_text(&payload.customer_contact, "numero_cliente", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "endereco", MAX_ADDRESS_LEN)?;

    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for item in &payload.items {
        validate_quantity(item.quantity, "quantidade")?;
        validate_optional_text(&item.notes, "observacoes", MAX_NOTE_LEN)?;
        validate_text_list(&item.garnishes, "acompanhamentos", MAX_SHORT_TEXT_LEN)?;
    }

    if payload.delivery == DeliveryMode::Delivery
        && shared::util::non_blank(payload.address.clone()).is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "endereco is required for delivery",
        ));
    }
    Ok(())
}

/// Create an order priced from the catalog
///
/// Nothing is written unless every product resolves.
pub async fn create_order(
    pool: &SqlitePool,
    business_date: &str,
    now: i64,
    payload: OrderCreate,
) -> AppResult<Order> {
    validate_create(&payload)?;

    let mut catalog: HashMap<i64, Product> = HashMap::new();
    for item in &payload.items {
        if catalog.contains_key(&item.product_id) {
            continue;
        }
        if let Some(p) = product::find_by_id(pool, item.product_id).await? {
            catalog.insert(p.id, p);
        }
    }
    let priced = price_order(&payload.items, &catalog, payload.payment_method)?;

    let address = match payload.delivery {
        DeliveryMode::Delivery => shared::util::non_blank(payload.address),
        DeliveryMode::Pickup => None,
    };
    let new_order = NewOrder {
        business_date: business_date.to_string(),
        customer_name: payload.customer_name.trim().to_string(),
        customer_contact: payload.customer_contact.trim().to_string(),
        items: priced.items,
        total: priced.total,
        status: payload.status.unwrap_or_default(),
        delivery: payload.delivery,
        address,
        payment_method: payload.payment_method,
        created_at: now,
    };

    let mut attempt = 0;
    let (id, order_number) = loop {
        attempt += 1;
        match order_repo::insert_next_number(pool, &new_order).await {
            Ok(reserved) => break reserved,
            Err(RepoError::Duplicate(msg)) if attempt < MAX_NUMBERING_ATTEMPTS => {
                tracing::warn!(attempt, error = %msg, "Daily order number taken, retrying");
            }
            Err(RepoError::Duplicate(msg)) => {
                return Err(AppError::with_message(ErrorCode::OrderNumberConflict, msg));
            }
            Err(e) => return Err(e.into()),
        }
    };

    tracing::info!(
        order_id = id,
        order_number,
        business_date,
        total = new_order.total,
        lines = new_order.items.len(),
        "Order created"
    );

    order_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database(format!("Order {id} vanished after insert")))
}

/// Apply an allow-listed update to one of the day's orders
///
/// Moving to `pronto` writes the order's summary in the same transaction;
/// a summary that already exists is left untouched. The transaction takes
/// the write lock up front: a deferred one would read first and then fail
/// with SQLITE_BUSY when a checkout commits in between, instead of waiting
/// on the busy timeout.
pub async fn update_order(
    pool: &SqlitePool,
    business_date: &str,
    order_number: i64,
    now: i64,
    update: OrderUpdate,
) -> AppResult<Order> {
    if update.is_empty() {
        return Err(AppError::validation("Update must change at least one field"));
    }
    validate_optional_text(&update.address, "endereco", MAX_ADDRESS_LEN)?;

    let mut tx = pool
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(RepoError::from)?;

    let current = order_repo::find_by_number(&mut *tx, business_date, order_number)
        .await?
        .ok_or_else(|| order_not_found(order_number))?;

    let delivery = update.delivery.unwrap_or(current.delivery);
    let address = shared::util::non_blank(update.address.clone().or(current.address.clone()));
    if delivery == DeliveryMode::Delivery && address.is_none() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "endereco is required for delivery",
        ));
    }

    order_repo::update_fields(&mut *tx, business_date, order_number, &update)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => order_not_found(order_number),
            other => other.into(),
        })?;

    let order = order_repo::find_by_id(&mut *tx, current.id)
        .await?
        .ok_or_else(|| order_not_found(order_number))?;

    if update.status == Some(OrderStatus::Ready) {
        let inserted =
            order_summary::insert_if_absent(&mut *tx, &order, &order.business_date, now).await?;
        if inserted {
            tracing::info!(order_id = order.id, order_number, "Order summarized");
        } else {
            tracing::debug!(order_id = order.id, order_number, "Order already summarized");
        }
    }

    tx.commit().await.map_err(RepoError::from)?;
    Ok(order)
}

/// All orders of the day, newest first
pub async fn list_orders(pool: &SqlitePool, business_date: &str) -> AppResult<Vec<Order>> {
    Ok(order_repo::list_for_date(pool, business_date).await?)
}

/// One of the day's orders by number
pub async fn get_order(
    pool: &SqlitePool,
    business_date: &str,
    order_number: i64,
) -> AppResult<Order> {
    order_repo::find_by_number(pool, business_date, order_number)
        .await?
        .ok_or_else(|| order_not_found(order_number))
}

/// A customer's orders across all days, newest first
pub async fn list_customer_orders(pool: &SqlitePool, contact: &str) -> AppResult<Vec<Order>> {
    validate_required_text(contact, "numero_cliente", MAX_SHORT_TEXT_LEN)?;
    Ok(order_repo::list_by_contact(pool, contact.trim()).await?)
}

/// Delete one of the day's orders; its summary (if any) is kept
pub async fn delete_order(
    pool: &SqlitePool,
    business_date: &str,
    order_number: i64,
) -> AppResult<()> {
    if !order_repo::delete_by_number(pool, business_date, order_number).await? {
        return Err(order_not_found(order_number));
    }
    tracing::info!(order_number, business_date, "Order deleted");
    Ok(())
}
