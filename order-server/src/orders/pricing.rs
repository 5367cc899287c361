//! Order pricing
//!
//! Prices come only from the product catalog; whatever the client sends is
//! ignored. Amounts are summed in `Decimal` and converted to `f64` once per
//! line and once for the total.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::ErrorCode;
use shared::models::{OrderItemRequest, OrderLineItem, PaymentMethod, Product};

use crate::utils::AppError;
use crate::utils::money::{to_decimal, to_f64};

/// Flat card fee added per order line (not per unit)
pub const CARD_SURCHARGE_PER_LINE: Decimal = Decimal::from_parts(100, 0, 0, false, 2);

/// Priced line items plus the order total
#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub items: Vec<OrderLineItem>,
    pub total: f64,
}

/// Price requested items against the catalog
///
/// Any unknown or inactive product fails the whole order, naming the id.
pub fn price_order(
    requests: &[OrderItemRequest],
    catalog: &HashMap<i64, Product>,
    payment_method: PaymentMethod,
) -> Result<PricedOrder, AppError> {
    let mut items = Vec::with_capacity(requests.len());
    let mut total = Decimal::ZERO;

    for request in requests {
        let product = catalog
            .get(&request.product_id)
            .filter(|p| p.is_active)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ProductNotFound,
                    format!("Product {} not found", request.product_id),
                )
                .with_detail("product_id", request.product_id)
            })?;

        let unit_price = to_decimal(product.price);
        let subtotal = unit_price * Decimal::from(request.quantity);
        total += subtotal;

        items.push(OrderLineItem {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: to_f64(unit_price),
            quantity: request.quantity,
            subtotal: to_f64(subtotal),
            notes: shared::util::non_blank(request.notes.clone()),
            garnishes: request.garnishes.clone(),
            item_number: request.item_number,
        });
    }

    if payment_method.has_card_surcharge() {
        total += CARD_SURCHARGE_PER_LINE * Decimal::from(requests.len());
    }

    Ok(PricedOrder {
        items,
        total: to_f64(total),
    })
}
