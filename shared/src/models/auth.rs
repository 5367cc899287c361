//! Login DTOs

use serde::{Deserialize, Serialize};

/// Role reported for anyone who is not a staff account
pub const CUSTOMER_ROLE: &str = "cliente";

/// `POST /auth/login`
///
/// Staff sign in with CPF in `nome` and password in `telefone`; customers
/// send their name and phone. Both fields are required either way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
}

/// Identity returned by login and profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// `admin`, `cozinha`, `atendente` or `cliente`
    #[serde(rename = "tipo_user")]
    pub role: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl SessionUser {
    pub fn customer(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            role: CUSTOMER_ROLE.to_string(),
            name: name.into(),
            phone: phone.into(),
        }
    }
}
