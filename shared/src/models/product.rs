//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `price` is the single source of truth at order time; orders copy it into
/// their line items and never look back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    #[serde(rename = "categoria_id")]
    pub category_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    /// Garnish options the customer may pick (JSON array column)
    #[serde(rename = "acompanhamentos", default)]
    #[cfg_attr(feature = "db", sqlx(json))]
    pub garnishes: Vec<String>,
    #[serde(rename = "ativo")]
    pub is_active: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    #[serde(rename = "categoria_id", alias = "categoriaId")]
    pub category_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "acompanhamentos", default)]
    pub garnishes: Vec<String>,
    #[serde(rename = "ativo")]
    pub is_active: Option<bool>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(rename = "categoria_id", alias = "categoriaId")]
    pub category_id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "preco")]
    pub price: Option<f64>,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "acompanhamentos")]
    pub garnishes: Option<Vec<String>>,
    #[serde(rename = "ativo")]
    pub is_active: Option<bool>,
}
