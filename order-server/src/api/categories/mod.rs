//! Category API
//!
//! The menu list is public; everything else is admin only.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::middleware::ADMIN_ONLY;
use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/categorias", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(ADMIN_ONLY)));

    read_routes.merge(manage_routes)
}
