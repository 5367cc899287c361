//! Server services
//!
//! - [`https`] - router assembly and the HTTP listener

pub mod https;

pub use https::{HttpService, build_app, routes};
