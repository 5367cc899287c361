//! JWT session tokens
//!
//! Handles token generation, validation and parsing. Tokens are only ever
//! issued to staff; customers have no session.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::StaffRole;
use thiserror::Error;

/// Minimum accepted secret length
pub const MIN_SECRET_LEN: usize = 32;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 characters)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Load from `JWT_SECRET`, `JWT_EXPIRATION_MINUTES`, `JWT_ISSUER`, `JWT_AUDIENCE`
    pub fn from_env() -> Result<Self, JwtError> {
        let secret = load_jwt_secret(std::env::var("JWT_SECRET").ok())?;
        Ok(Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "tempero-order-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "tempero-staff".to_string()),
        })
    }

    /// Fixed configuration for tests
    pub fn for_tests() -> Self {
        Self {
            secret: "test-secret-with-at-least-thirty-two-chars".to_string(),
            expiration_minutes: 60,
            issuer: "tempero-order-server".to_string(),
            audience: "tempero-staff".to_string(),
        }
    }
}

/// JWT claims stored in the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Staff id
    pub sub: String,
    pub name: String,
    pub phone: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Generate a printable random secret (development fallback)
pub fn generate_secure_printable_jwt_secret() -> String {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    if rng.fill(&mut bytes).is_err() {
        return "TemperoOrderServerDevelopmentSecureKey2025!".to_string();
    }
    bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect()
}

/// Validate the configured secret
///
/// Debug builds generate a temporary secret when none is set; release builds
/// refuse to start without one.
fn load_jwt_secret(value: Option<String>) -> Result<String, JwtError> {
    match value {
        Some(secret) => {
            if secret.len() < MIN_SECRET_LEN {
                return Err(JwtError::ConfigError(format!(
                    "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
                )));
            }
            Ok(secret)
        }
        None => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set! Generating temporary key for development.");
                Ok(generate_secure_printable_jwt_secret())
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a session token for a staff member
    pub fn generate_token(
        &self,
        staff_id: i64,
        name: &str,
        phone: &str,
        role: StaffRole,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: staff_id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            role: role.as_str().to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Cookie lifetime matching the token lifetime
    pub fn session_max_age_secs(&self) -> i64 {
        self.config.expiration_minutes * 60
    }
}

/// Authenticated staff member (decoded from the session cookie)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub role: StaffRole,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse()
            .map_err(|_| JwtError::InvalidToken(format!("Invalid subject: {}", claims.sub)))?;
        let role = StaffRole::parse(&claims.role)
            .ok_or_else(|| JwtError::InvalidToken(format!("Unknown role: {}", claims.role)))?;
        Ok(Self {
            id,
            name: claims.name,
            phone: claims.phone,
            role,
        })
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }

    pub fn has_role(&self, allowed: &[StaffRole]) -> bool {
        allowed.contains(&self.role)
    }
}
