//! Staff account API (admin only)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::middleware::ADMIN_ONLY;
use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/usuario", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(ADMIN_ONLY)))
}
