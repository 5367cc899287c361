//! Staff Repository
//!
//! Owns password hashing: hashes never leave this module except through
//! [`StaffCredentials`], which is only used by login.

use super::{RepoError, RepoResult};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use shared::models::{StaffAccount, StaffCreate, StaffUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, national_id, phone, role, created_at";

/// Staff account plus its password hash
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StaffCredentials {
    #[sqlx(flatten)]
    pub account: StaffAccount,
    pub password_hash: String,
}

impl StaffCredentials {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }
}

/// Hash password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash; malformed hashes never match
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            false
        }
    }
}

fn hash_or_error(password: &str) -> RepoResult<String> {
    hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<StaffAccount>> {
    let accounts =
        sqlx::query_as::<_, StaffAccount>(&format!("SELECT {COLUMNS} FROM staff ORDER BY id"))
            .fetch_all(pool)
            .await?;
    Ok(accounts)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StaffAccount>> {
    let account =
        sqlx::query_as::<_, StaffAccount>(&format!("SELECT {COLUMNS} FROM staff WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(account)
}

/// Login lookup by CPF, including the hash
pub async fn find_credentials(
    pool: &SqlitePool,
    national_id: &str,
) -> RepoResult<Option<StaffCredentials>> {
    let credentials = sqlx::query_as::<_, StaffCredentials>(&format!(
        "SELECT {COLUMNS}, password_hash FROM staff WHERE national_id = ? LIMIT 1"
    ))
    .bind(national_id)
    .fetch_optional(pool)
    .await?;
    Ok(credentials)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM staff")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: StaffCreate, now: i64) -> RepoResult<StaffAccount> {
    let password_hash = hash_or_error(&data.password)?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO staff (name, national_id, phone, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.national_id)
    .bind(&data.phone)
    .bind(password_hash)
    .bind(data.role)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create staff account".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: StaffUpdate) -> RepoResult<StaffAccount> {
    let password_hash = data.password.as_deref().map(hash_or_error).transpose()?;
    let rows = sqlx::query(
        "UPDATE staff SET name = COALESCE(?1, name), national_id = COALESCE(?2, national_id), phone = COALESCE(?3, phone), password_hash = COALESCE(?4, password_hash), role = COALESCE(?5, role) WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.national_id)
    .bind(&data.phone)
    .bind(password_hash)
    .bind(data.role)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Staff {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Staff {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM staff WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
