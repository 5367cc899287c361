//! Order API Handlers
//!
//! The business date is read from the clock once per request and handed to
//! the lifecycle functions.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Order, OrderCreate, OrderUpdate};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders;
use crate::utils::{ApiResponse, AppResult};

/// POST /pedidos
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let business_date = state.clock.today_key();
    let order = orders::create_order(&state.pool, &business_date, now_millis(), payload).await?;
    Ok(Json(order))
}

/// GET /pedidos
pub async fn list_today(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = orders::list_orders(&state.pool, &state.clock.today_key()).await?;
    Ok(Json(orders))
}

/// GET /pedidos/{numero_pedido}
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(order_number): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = orders::get_order(&state.pool, &state.clock.today_key(), order_number).await?;
    Ok(Json(order))
}

/// GET /pedidos/cliente/{numero_cliente}
pub async fn customer_history(
    State(state): State<ServerState>,
    Path(contact): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = orders::list_customer_orders(&state.pool, &contact).await?;
    Ok(Json(orders))
}

/// PATCH /pedidos/{numero_pedido}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_number): Path<i64>,
    Json(update): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let business_date = state.clock.today_key();
    let order =
        orders::update_order(&state.pool, &business_date, order_number, now_millis(), update)
            .await?;
    tracing::info!(
        order_number,
        status = %order.status,
        staff_id = user.id,
        "Order updated"
    );
    Ok(Json(order))
}

/// DELETE /pedidos/{numero_pedido}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_number): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    orders::delete_order(&state.pool, &state.clock.today_key(), order_number).await?;
    tracing::info!(order_number, staff_id = user.id, "Order deleted");
    Ok(ApiResponse::ok_with_message("Pedido excluído"))
}
