//! Daily Order Summary Model
//!
//! Frozen projection of an order taken when it reaches "pronto". Reports
//! read only these rows.

use serde::{Deserialize, Serialize};

/// Compact item kept in a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryItem {
    #[serde(rename = "produto")]
    pub product_name: String,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    /// Unit price
    #[serde(rename = "preco")]
    pub price: f64,
}

/// Daily order summary entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    #[serde(rename = "pedido_id")]
    pub order_id: i64,
    #[serde(rename = "numero_pedido")]
    pub order_number: i64,
    /// Business day the order was completed (YYYY-MM-DD)
    #[serde(rename = "data")]
    pub summary_date: String,
    #[serde(rename = "total_valor")]
    pub total_value: f64,
    #[serde(rename = "itens")]
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<SummaryItem>,
    /// Unix millis
    #[serde(rename = "criado_em")]
    pub created_at: i64,
}
