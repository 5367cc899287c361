//! Receipt printing
//!
//! - [`ReceiptRenderer`] - lays out an order as ESC/POS bytes
//! - [`print_order`] - renders one of the day's orders and sends it to the
//!   configured network printer

mod renderer;
mod service;

pub use renderer::ReceiptRenderer;
pub use service::{print_order, send_to_printer};
