//! Order API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /pedidos | POST | none |
//! | /pedidos | GET | admin, cozinha |
//! | /pedidos/{numero_pedido} | GET | none |
//! | /pedidos/{numero_pedido} | PATCH, DELETE | admin, cozinha |
//! | /pedidos/cliente/{numero_cliente} | GET | none |
//!
//! Order numbers are per business day, so `{numero_pedido}` always refers to
//! today's order with that number.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::middleware::KITCHEN_ROLES;
use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/pedidos", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/", post(handler::create))
        .route("/cliente/{numero_cliente}", get(handler::customer_history))
        .route("/{numero_pedido}", get(handler::get_by_number));

    let kitchen_routes = Router::new()
        .route("/", get(handler::list_today))
        .route("/{numero_pedido}", patch(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_role(KITCHEN_ROLES)));

    public_routes.merge(kitchen_routes)
}
