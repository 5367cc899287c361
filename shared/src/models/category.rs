//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category (Marmitas, Bebidas, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    /// Informational "starting at" price shown on the menu card
    #[serde(rename = "preco")]
    pub display_price: Option<f64>,
    #[serde(rename = "ativo")]
    pub is_active: bool,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    #[serde(rename = "preco")]
    pub display_price: Option<f64>,
    #[serde(rename = "ativo")]
    pub is_active: Option<bool>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    #[serde(rename = "preco")]
    pub display_price: Option<f64>,
    #[serde(rename = "ativo")]
    pub is_active: Option<bool>,
}
