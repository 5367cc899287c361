//! Authentication routes
//!
//! - `POST /auth/login`: public
//! - `GET /auth/profile`, `POST /auth/logout`: need the session cookie

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/profile", get(handler::profile))
        .route("/logout", post(handler::logout))
}
