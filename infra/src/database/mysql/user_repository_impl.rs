//! MySQL implementation of the UserRepository trait.
//!
//! Accounts live in the `users` table created by the embedded migrations.
//! Ids are stored as CHAR(36) strings and permissions as a JSON array in a
//! TEXT column. The table collation is case-insensitive, so email equality
//! in SQL already ignores case.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use re_core::domain::entities::user::UserAccount;
use re_core::errors::{AuthError, DomainError};
use re_core::repositories::UserRepository;

const USER_COLUMNS: &str = r#"
    id, email, password_hash, first_name, last_name, role, permissions,
    is_active, is_email_verified, refresh_token_hash, refresh_token_expiry,
    failed_login_attempts, lockout_end, last_login, created_at, updated_at
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to UserAccount entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<UserAccount, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let permissions: String = row
            .try_get("permissions")
            .map_err(column_error("permissions"))?;

        Ok(UserAccount {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID in users.id: {}", e),
            })?,
            email: row.try_get("email").map_err(column_error("email"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            first_name: row.try_get("first_name").map_err(column_error("first_name"))?,
            last_name: row.try_get("last_name").map_err(column_error("last_name"))?,
            role: row.try_get("role").map_err(column_error("role"))?,
            permissions: decode_permissions(&permissions)?,
            is_active: row.try_get("is_active").map_err(column_error("is_active"))?,
            is_email_verified: row
                .try_get("is_email_verified")
                .map_err(column_error("is_email_verified"))?,
            refresh_token: row
                .try_get("refresh_token_hash")
                .map_err(column_error("refresh_token_hash"))?,
            refresh_token_expiry: row
                .try_get::<Option<DateTime<Utc>>, _>("refresh_token_expiry")
                .map_err(column_error("refresh_token_expiry"))?,
            failed_login_attempts: row
                .try_get("failed_login_attempts")
                .map_err(column_error("failed_login_attempts"))?,
            lockout_end: row
                .try_get::<Option<DateTime<Utc>>, _>("lockout_end")
                .map_err(column_error("lockout_end"))?,
            last_login: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login")
                .map_err(column_error("last_login"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }

    async fn fetch_one_where(
        &self,
        predicate: &str,
        value: String,
    ) -> Result<Option<UserAccount>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} LIMIT 1", USER_COLUMNS, predicate);

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn decode_permissions(raw: &str) -> Result<Vec<String>, DomainError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| DomainError::Internal {
        message: format!("Invalid permissions JSON: {}", e),
    })
}

fn encode_permissions(permissions: &[String]) -> Result<String, DomainError> {
    serde_json::to_string(permissions).map_err(|e| DomainError::Internal {
        message: format!("Failed to encode permissions: {}", e),
    })
}

/// Driver failures become `StoreUnavailable`; unique-key violations on insert
/// are surfaced as account conflicts by the caller.
fn map_sqlx_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "User store query failed");
    DomainError::store(e)
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        let permissions = encode_permissions(&account.permissions)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, email, password_hash, first_name, last_name, role, permissions,
                is_active, is_email_verified, refresh_token_hash, refresh_token_expiry,
                failed_login_attempts, lockout_end, last_login, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(account.id.to_string())
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.role)
        .bind(permissions)
        .bind(account.is_active)
        .bind(account.is_email_verified)
        .bind(&account.refresh_token)
        .bind(account.refresh_token_expiry)
        .bind(account.failed_login_attempts)
        .bind(account.lockout_end)
        .bind(account.last_login)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::debug!(user_id = %account.id, "Inserted user account");
                Ok(account)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::AccountConflict.into())
            }
            Err(e) => Err(map_sqlx_error(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(None);
        }
        self.fetch_one_where("email = ? AND is_active = TRUE", email.to_string())
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, DomainError> {
        self.fetch_one_where("id = ? AND is_active = TRUE", id.to_string())
            .await
    }

    async fn find_by_refresh_token(
        &self,
        token_digest: &str,
    ) -> Result<Option<UserAccount>, DomainError> {
        if token_digest.is_empty() {
            return Ok(None);
        }
        self.fetch_one_where("refresh_token_hash = ?", token_digest.to_string())
            .await
    }

    async fn update(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        let permissions = encode_permissions(&account.permissions)?;

        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = ?, password_hash = ?, first_name = ?, last_name = ?, role = ?,
                permissions = ?, is_active = ?, is_email_verified = ?,
                refresh_token_hash = ?, refresh_token_expiry = ?,
                failed_login_attempts = ?, lockout_end = ?, last_login = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.role)
        .bind(permissions)
        .bind(account.is_active)
        .bind(account.is_email_verified)
        .bind(&account.refresh_token)
        .bind(account.refresh_token_expiry)
        .bind(account.failed_login_attempts)
        .bind(account.lockout_end)
        .bind(account.last_login)
        .bind(account.updated_at)
        .bind(account.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            // MySQL reports zero affected rows for no-op updates too
            let exists = sqlx::query("SELECT 1 FROM users WHERE id = ?")
                .bind(account.id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?
                .is_some();
            if !exists {
                return Err(DomainError::NotFound {
                    resource: "User".to_string(),
                });
            }
        }

        Ok(account)
    }

    async fn update_refresh_token(
        &self,
        id: Uuid,
        token_digest: &str,
        expiry: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = ?, refresh_token_expiry = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(token_digest)
        .bind(expiry)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET last_login = ?, updated_at = ? WHERE id = ?")
            .bind(at)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_failed_login_attempts(&self, id: Uuid) -> Result<Option<u32>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let updated = sqlx::query(
            r#"
            UPDATE users
            SET failed_login_attempts = failed_login_attempts + 1, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if updated.rows_affected() == 0 {
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Ok(None);
        }

        let row = sqlx::query("SELECT failed_login_attempts FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        let attempts: u32 = row
            .try_get("failed_login_attempts")
            .map_err(column_error("failed_login_attempts"))?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(Some(attempts))
    }

    async fn reset_failed_login_attempts(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET failed_login_attempts = 0, lockout_end = NULL, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn lock_user_account(
        &self,
        id: Uuid,
        until: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET lockout_end = ?, updated_at = ? WHERE id = ?")
            .bind(until)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_json_round_trip() {
        let permissions = vec!["listings:read".to_string(), "listings:write".to_string()];
        let encoded = encode_permissions(&permissions).unwrap();

        assert_eq!(encoded, r#"["listings:read","listings:write"]"#);
        assert_eq!(decode_permissions(&encoded).unwrap(), permissions);
    }

    #[test]
    fn test_blank_permissions_decode_to_empty() {
        assert!(decode_permissions("").unwrap().is_empty());
        assert!(decode_permissions("[]").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_permissions_are_internal_errors() {
        let err = decode_permissions("not json").unwrap_err();
        assert!(matches!(err, DomainError::Internal { .. }));
    }
}
