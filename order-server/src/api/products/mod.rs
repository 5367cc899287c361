//! Product API
//!
//! Listing a category's products is public; writes are admin only.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::middleware::ADMIN_ONLY;
use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/produtos", routes())
}

fn routes() -> Router<ServerState> {
    // GET takes a category id, PATCH/DELETE a product id
    let read_routes = Router::new().route("/{id}", get(handler::list_by_category));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", patch(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_role(ADMIN_ONLY)));

    read_routes.merge(manage_routes)
}
