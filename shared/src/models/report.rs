//! Report DTOs
//!
//! Shapes consumed by the admin dashboard charts.

use serde::{Deserialize, Serialize};

/// Reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Today (business timezone)
    Day,
    /// Rolling 7 days
    Week,
    /// Rolling calendar month
    Month,
    #[default]
    All,
}

impl ReportPeriod {
    /// Lenient parse: anything unknown means `All`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "dia" => Self::Day,
            "week" | "semana" => Self::Week,
            "month" | "mes" => Self::Month,
            _ => Self::All,
        }
    }
}

/// Per-product totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    pub total: f64,
}

/// `GET /relatorio/resumo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    #[serde(rename = "totalPedidos")]
    pub total_orders: i64,
    #[serde(rename = "totalItens")]
    pub total_items: i64,
    #[serde(rename = "faturamentoTotal")]
    pub total_revenue: f64,
    #[serde(rename = "itens")]
    pub items: Vec<ProductSales>,
}

/// Pie chart slice (revenue per product)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

/// Line chart point (orders per day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOrderCount {
    /// YYYY-MM-DD
    #[serde(rename = "dia")]
    pub day: String,
    pub total: i64,
}
