//! Print Handler

use axum::extract::{Path, State};

use crate::core::ServerState;
use crate::printing;
use crate::utils::{ApiResponse, AppResult};

/// GET /imprimir/{numero_pedido}
pub async fn print(
    State(state): State<ServerState>,
    Path(order_number): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    let order = printing::print_order(&state, order_number).await?;
    Ok(ApiResponse::ok_with_message(format!(
        "Pedido #{} enviado para impressão",
        order.order_number
    )))
}
