//! Order pricing and lifecycle engine
//!
//! - [`pricing`] - server-side totals from stored product prices
//! - [`lifecycle`] - create, update/summarize, query and delete orders

pub mod lifecycle;
pub mod pricing;

pub use lifecycle::{
    create_order, delete_order, get_order, list_customer_orders, list_orders, update_order,
};
pub use pricing::{CARD_SURCHARGE_PER_LINE, PricedOrder, price_order};
