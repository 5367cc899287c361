//! Staff Account Model

use serde::{Deserialize, Serialize};

/// Staff role
///
/// Customers have no role row; they are the implicit `cliente` identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum StaffRole {
    Admin,
    /// Kitchen
    Cozinha,
    /// Attendant
    Atendente,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Cozinha => "cozinha",
            Self::Atendente => "atendente",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "cozinha" => Some(Self::Cozinha),
            "atendente" => Some(Self::Atendente),
            _ => None,
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff account (without password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffAccount {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    /// CPF, also the login identifier
    #[serde(rename = "cpf")]
    pub national_id: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "tipo_user")]
    pub role: StaffRole,
    /// Unix millis
    #[serde(rename = "criado_em")]
    pub created_at: i64,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpf")]
    pub national_id: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "tipo_user")]
    pub role: StaffRole,
}

/// Update staff payload (at least one field required)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffUpdate {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "cpf")]
    pub national_id: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "senha")]
    pub password: Option<String>,
    #[serde(rename = "tipo_user")]
    pub role: Option<StaffRole>,
}

impl StaffUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.national_id.is_none()
            && self.phone.is_none()
            && self.password.is_none()
            && self.role.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_values() {
        assert_eq!(serde_json::to_string(&StaffRole::Cozinha).unwrap(), "\"cozinha\"");
        assert_eq!(StaffRole::parse("admin"), Some(StaffRole::Admin));
        assert_eq!(StaffRole::parse("cliente"), None);
    }

    #[test]
    fn test_account_never_serializes_password() {
        let account = StaffAccount {
            id: 1,
            name: "Ana".into(),
            national_id: "12345678900".into(),
            phone: "71988887777".into(),
            role: StaffRole::Admin,
            created_at: 0,
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("senha").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["tipo_user"], "admin");
    }
}
