//! HTTP API
//!
//! One module per resource, each exposing `router()`:
//!
//! - [`health`] - liveness
//! - [`auth`] - login, profile, logout
//! - [`categories`] - `/categorias`
//! - [`products`] - `/produtos`
//! - [`orders`] - `/pedidos`
//! - [`print`] - `/imprimir`
//! - [`reports`] - `/relatorio`
//! - [`staff`] - `/usuario`
//!
//! Routes that share a path but differ in access (public read, staff
//! write) are split into two routers, the protected one carrying a
//! [`require_role`](crate::auth::require_role) layer, and merged.

pub mod auth;
pub mod categories;
pub mod health;
pub mod orders;
pub mod print;
pub mod products;
pub mod reports;
pub mod staff;

pub use crate::utils::{AppError, AppResult};
