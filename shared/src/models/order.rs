//! Order Model
//!
//! Line items are embedded in the order row (JSON column) with the name and
//! unit price resolved at creation time. Later product edits never reach
//! them.

use serde::{Deserialize, Deserializer, Serialize};

/// Kitchen workflow status
///
/// Soft ordering `pendente → confirmado → preparando → pronto → entregue`.
/// Only the value set is enforced; the kitchen board may move cards freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "pendente")]
    #[cfg_attr(feature = "db", sqlx(rename = "pendente"))]
    Pending,
    #[serde(rename = "confirmado")]
    #[cfg_attr(feature = "db", sqlx(rename = "confirmado"))]
    Confirmed,
    #[serde(rename = "preparando")]
    #[cfg_attr(feature = "db", sqlx(rename = "preparando"))]
    Preparing,
    /// Triggers the daily summary
    #[serde(rename = "pronto")]
    #[cfg_attr(feature = "db", sqlx(rename = "pronto"))]
    Ready,
    #[serde(rename = "entregue")]
    #[cfg_attr(feature = "db", sqlx(rename = "entregue"))]
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Confirmed => "confirmado",
            Self::Preparing => "preparando",
            Self::Ready => "pronto",
            Self::Delivered => "entregue",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method recorded on the order (payment itself happens offline)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum PaymentMethod {
    #[serde(rename = "dinheiro")]
    #[cfg_attr(feature = "db", sqlx(rename = "dinheiro"))]
    Cash,
    #[serde(rename = "cartao")]
    #[cfg_attr(feature = "db", sqlx(rename = "cartao"))]
    Card,
    #[serde(rename = "pix")]
    #[cfg_attr(feature = "db", sqlx(rename = "pix"))]
    Pix,
}

impl PaymentMethod {
    /// Card payments carry a flat per-line surcharge
    pub fn has_card_surcharge(&self) -> bool {
        matches!(self, Self::Card)
    }

    /// Label printed on receipts
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Dinheiro",
            Self::Card => "Cartão",
            Self::Pix => "Pix",
        }
    }
}

/// Pickup at the counter or delivery to an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum DeliveryMode {
    #[serde(rename = "retirada")]
    #[cfg_attr(feature = "db", sqlx(rename = "retirada"))]
    Pickup,
    #[serde(rename = "entrega")]
    #[cfg_attr(feature = "db", sqlx(rename = "entrega"))]
    Delivery,
}

impl DeliveryMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pickup => "Retirada",
            Self::Delivery => "Entrega",
        }
    }
}

/// Priced line item frozen into the order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    #[serde(rename = "id_produto")]
    pub product_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco_unitario")]
    pub unit_price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    /// unit_price × quantity
    pub subtotal: f64,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "acompanhamentos", default)]
    pub garnishes: Vec<String>,
    /// Client-side display position, never used for pricing
    #[serde(rename = "itemNumber", default)]
    pub item_number: i32,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Sequence number within `business_date`
    #[serde(rename = "numero_pedido")]
    pub order_number: i64,
    #[serde(rename = "nome_cliente")]
    pub customer_name: String,
    /// Customer phone, used as the history lookup key
    #[serde(rename = "numero_cliente")]
    pub customer_contact: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<OrderLineItem>,
    #[serde(rename = "valor_total")]
    pub total: f64,
    pub status: OrderStatus,
    #[serde(rename = "entrega")]
    pub delivery: DeliveryMode,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
    #[serde(rename = "metodo_pagamento")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "pago")]
    pub is_paid: bool,
    /// Business day (YYYY-MM-DD, restaurant timezone)
    #[serde(rename = "data_pedido")]
    pub business_date: String,
    /// Unix millis
    #[serde(rename = "criado_em")]
    pub created_at: i64,
}

/// Requested item in a new order
///
/// Carries no price: the server resolves it from the product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    #[serde(rename = "id_produto")]
    pub product_id: i64,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(rename = "acompanhamentos", default)]
    pub garnishes: Vec<String>,
    #[serde(rename = "itemNumber", default)]
    pub item_number: i32,
}

/// Create order payload (public checkout)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(rename = "nome_cliente")]
    pub customer_name: String,
    #[serde(rename = "numero_cliente")]
    pub customer_contact: String,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    #[serde(rename = "metodo_pagamento")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "deliveryType", alias = "entrega")]
    pub delivery: DeliveryMode,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Allow-listed order update
///
/// Pricing fields are absent: the total is computed once at creation.
/// Unknown keys are rejected instead of ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    /// `true`/`false`, or the admin board's `"SIM"`/`"NÃO"`
    #[serde(rename = "pago", default, deserialize_with = "paid_flag")]
    pub is_paid: Option<bool>,
    #[serde(rename = "entrega")]
    pub delivery: Option<DeliveryMode>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PaidFlag {
    Bool(bool),
    Text(String),
}

fn paid_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PaidFlag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PaidFlag::Bool(paid)) => Ok(Some(paid)),
        Some(PaidFlag::Text(text)) => match text.trim().to_uppercase().as_str() {
            "SIM" => Ok(Some(true)),
            "NÃO" | "NAO" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "pago must be a boolean, SIM or NÃO, got {other:?}"
            ))),
        },
    }
}

impl OrderUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.is_paid.is_none()
            && self.delivery.is_none()
            && self.address.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Ready).unwrap(),
            "\"pronto\""
        );
        let status: OrderStatus = serde_json::from_str("\"preparando\"").unwrap();
        assert_eq!(status, OrderStatus::Preparing);
        assert!(serde_json::from_str::<OrderStatus>("\"cancelado\"").is_err());
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_create_payload_from_checkout_form() {
        let json = r#"{
            "nome_cliente": "Maria",
            "numero_cliente": "71999990000",
            "items": [
                {"id_produto": 3, "quantidade": 2, "preco": 999.0, "acompanhamentos": ["Farofa"], "itemNumber": 1}
            ],
            "metodo_pagamento": "cartao",
            "deliveryType": "entrega",
            "endereco": "Rua A, 10"
        }"#;
        let payload: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(payload.payment_method, PaymentMethod::Card);
        assert_eq!(payload.delivery, DeliveryMode::Delivery);
        assert_eq!(payload.items[0].garnishes, vec!["Farofa".to_string()]);
        assert!(payload.status.is_none());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(OrderUpdate::default().is_empty());
        let update: OrderUpdate = serde_json::from_str(r#"{"pago": true}"#).unwrap();
        assert!(!update.is_empty());
        assert_eq!(update.is_paid, Some(true));
        assert!(serde_json::from_str::<OrderUpdate>(r#"{"valor_total": 0}"#).is_err());
    }

    #[test]
    fn test_update_accepts_admin_board_paid_flag() {
        let paid: OrderUpdate = serde_json::from_str(r#"{"pago": "SIM"}"#).unwrap();
        assert_eq!(paid.is_paid, Some(true));
        let unpaid: OrderUpdate = serde_json::from_str(r#"{"pago": "NÃO"}"#).unwrap();
        assert_eq!(unpaid.is_paid, Some(false));
        let status_only: OrderUpdate = serde_json::from_str(r#"{"status": "pronto"}"#).unwrap();
        assert_eq!(status_only.is_paid, None);
        assert!(serde_json::from_str::<OrderUpdate>(r#"{"pago": "talvez"}"#).is_err());
    }

    #[test]
    fn test_surcharge_only_for_card() {
        assert!(PaymentMethod::Card.has_card_surcharge());
        assert!(!PaymentMethod::Cash.has_card_surcharge());
        assert!(!PaymentMethod::Pix.has_card_surcharge());
    }
}
