//! Core module: configuration, shared state and the HTTP server
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - state shared by every handler
//! - [`Server`] - HTTP server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::{BootstrapAdmin, Config, PrinterConfig};
pub use server::Server;
pub use state::ServerState;
