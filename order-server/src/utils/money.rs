//! Money conversion
//!
//! Amounts are computed in `Decimal` and stored as `f64` (SQLite REAL).
//! Conversions round to 2 places so binary float noise never reaches a total.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Currency scale (centavos)
pub const SCALE: u32 = 2;

/// f64 → Decimal, rounded to currency precision
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp(SCALE)
}

/// Decimal → f64 for storage and JSON
pub fn to_f64(value: Decimal) -> f64 {
    value.round_dp(SCALE).to_f64().unwrap_or_default()
}

/// Receipt amount: `R$ 22.50`
pub fn format_amount(value: f64) -> String {
    format!("R$ {:.2}", to_decimal(value))
}
