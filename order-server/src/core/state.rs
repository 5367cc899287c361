//! Server state shared by all handlers

use std::sync::Arc;

use shared::models::{StaffCreate, StaffRole};
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::staff;
use crate::utils::AppError;
use crate::utils::time::BusinessClock;

/// Server state
///
/// Cheap to clone: the pool and JWT service are reference counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    /// Business timezone and day cutoff
    pub clock: BusinessClock,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let clock = config.clock();
        Self {
            config,
            pool,
            jwt_service,
            clock,
        }
    }

    /// Open the database, apply migrations and seed the bootstrap admin
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::internal(format!("Failed to create work dir {}: {e}", config.work_dir))
        })?;

        let db = DbService::new(&config.database_path).await?;
        let state = Self::new(config.clone(), db.pool);
        state.ensure_bootstrap_admin().await?;
        Ok(state)
    }

    /// State over a fresh in-memory database
    pub async fn for_tests(config: Config) -> Result<Self, AppError> {
        let db = DbService::in_memory().await?;
        Ok(Self::new(config, db.pool))
    }

    /// Create the configured admin when no staff account exists yet
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_bootstrap_admin(&self) -> Result<bool, AppError> {
        let Some(admin) = &self.config.bootstrap_admin else {
            return Ok(false);
        };
        if staff::count(&self.pool).await? > 0 {
            return Ok(false);
        }

        let account = staff::create(
            &self.pool,
            StaffCreate {
                name: admin.name.clone(),
                national_id: admin.national_id.clone(),
                phone: String::new(),
                password: admin.password.clone(),
                role: StaffRole::Admin,
            },
            shared::util::now_millis(),
        )
        .await?;
        tracing::info!(staff_id = account.id, "Bootstrap admin account created");
        Ok(true)
    }

    /// Shared JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
