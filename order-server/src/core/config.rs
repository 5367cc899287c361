use std::path::Path;
use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::utils::time::{BusinessClock, parse_cutoff, parse_timezone};
use crate::utils::{AppError, ErrorCode};

/// Receipt printer settings
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// `host:port` of the raw TCP printer
    pub addr: String,
    /// Characters per line (48 for 80mm paper)
    pub width: usize,
    pub timeout: Duration,
}

/// First admin account, created only when the staff table is empty
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub national_id: String,
    pub password: String,
    pub name: String,
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | DATABASE_PATH | $WORK_DIR/tempero.db | SQLite file |
/// | HTTP_PORT | 3001 | HTTP listen port |
/// | CORS_ORIGIN | http://localhost:3000 | Web client origin (credentials allowed) |
/// | BUSINESS_TIMEZONE | America/Sao_Paulo | Timezone that defines "today" |
/// | BUSINESS_DAY_CUTOFF | 00:00 | Local time the business day rolls over |
/// | PRINTER_ADDR | 192.168.0.150:9100 | Receipt printer |
/// | PRINTER_WIDTH | 48 | Receipt characters per line |
/// | PRINTER_TIMEOUT_SECS | 5 | Connect/write timeout |
/// | ENVIRONMENT | development | development \| production |
/// | LOG_LEVEL | info | Log level |
/// | LOG_JSON | false | JSON console logs |
/// | LOG_DIR | (unset) | Rolling log files directory |
/// | JWT_* | see [`JwtConfig`] | Session tokens |
/// | ADMIN_CPF / ADMIN_PASSWORD / ADMIN_NAME | (unset) | Bootstrap admin |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/tempero HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub http_port: u16,
    pub cors_origin: String,
    pub timezone: Tz,
    pub business_day_cutoff: NaiveTime,
    pub printer: PrinterConfig,
    /// development | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub jwt: JwtConfig,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults. Only the JWT secret can
    /// make loading fail.
    pub fn from_env() -> Result<Self, AppError> {
        let work_dir = env_or("WORK_DIR", "./data");
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            Path::new(&work_dir)
                .join("tempero.db")
                .to_string_lossy()
                .into_owned()
        });
        let jwt = JwtConfig::from_env()
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;

        let bootstrap_admin = match (
            std::env::var("ADMIN_CPF").ok().filter(|v| !v.trim().is_empty()),
            std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        ) {
            (Some(national_id), Some(password)) => Some(BootstrapAdmin {
                national_id,
                password,
                name: env_or("ADMIN_NAME", "Administrador"),
            }),
            _ => None,
        };

        Ok(Self {
            work_dir,
            database_path,
            http_port: env_parse("HTTP_PORT", 3001),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:3000"),
            timezone: parse_timezone(&env_or("BUSINESS_TIMEZONE", "America/Sao_Paulo")),
            business_day_cutoff: parse_cutoff(&env_or("BUSINESS_DAY_CUTOFF", "00:00")),
            printer: PrinterConfig {
                addr: env_or("PRINTER_ADDR", "192.168.0.150:9100"),
                width: env_parse("PRINTER_WIDTH", 48),
                timeout: Duration::from_secs(env_parse("PRINTER_TIMEOUT_SECS", 5)),
            },
            environment: env_or("ENVIRONMENT", "development"),
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_parse("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
            jwt,
            bootstrap_admin,
        })
    }

    /// Deterministic configuration for tests (in-memory database, fixed secret)
    pub fn for_tests() -> Self {
        Self {
            work_dir: ".".into(),
            database_path: ":memory:".into(),
            http_port: 0,
            cors_origin: "http://localhost:3000".into(),
            timezone: chrono_tz::America::Sao_Paulo,
            business_day_cutoff: NaiveTime::MIN,
            printer: PrinterConfig {
                addr: "127.0.0.1:9100".into(),
                width: 48,
                timeout: Duration::from_secs(1),
            },
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            jwt: JwtConfig::for_tests(),
            bootstrap_admin: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn clock(&self) -> BusinessClock {
        BusinessClock::new(self.timezone, self.business_day_cutoff)
    }
}
