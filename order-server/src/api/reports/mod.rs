//! Sales reports (admin only)
//!
//! All three endpoints take `?period=` (or `?periodo=`): `day`, `week`,
//! `month` or `all`. Unknown values fall back to `all`.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::middleware::ADMIN_ONLY;
use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/relatorio", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/resumo", get(handler::summary))
        .route("/graficopizza", get(handler::pie))
        .route("/graficolinha", get(handler::line))
        .layer(middleware::from_fn(require_role(ADMIN_ONLY)))
}
