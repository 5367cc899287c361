//! Receipt printing route
//!
//! `GET /imprimir/{numero_pedido}` (admin, cozinha) prints today's order on
//! the configured network printer.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::middleware::KITCHEN_ROLES;
use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/imprimir", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{numero_pedido}", get(handler::print))
        .layer(middleware::from_fn(require_role(KITCHEN_ROLES)))
}
