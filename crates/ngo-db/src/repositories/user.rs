//! PostgreSQL implementation of UserRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ngo_core::{DomainError, RepoResult, Role, User, UserRepository};

use crate::mappers::profile_columns;
use crate::models::{RoleCountModel, UserModel};

use super::error::{map_db_error, map_unique_violation};

const USER_COLUMNS: &str =
    "email, name, role, photo_url, org_name, org_address, org_phone, joined_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, user, password_hash), fields(email = %user.email))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let columns = profile_columns(&user.profile);

        sqlx::query(
            r#"
            INSERT INTO users (email, name, password_hash, role, photo_url,
                               org_name, org_address, org_phone, joined_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(password_hash)
        .bind(user.role().as_str())
        .bind(columns.photo_url)
        .bind(columns.org_name)
        .bind(columns.org_address)
        .bind(columns.org_phone)
        .bind(user.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let columns = profile_columns(&user.profile);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, photo_url = $3, org_name = $4, org_address = $5, org_phone = $6
            WHERE email = $1 AND role = $7
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(columns.photo_url)
        .bind(columns.org_name)
        .bind(columns.org_address)
        .bind(columns.org_phone)
        .bind(user.role().as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.email.clone()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, email: &str) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY joined_at, email"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_role(&self) -> RepoResult<HashMap<Role, i64>> {
        let rows = sqlx::query_as::<_, RoleCountModel>(
            "SELECT role, COUNT(*)::BIGINT AS count FROM users GROUP BY role",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|row| {
                let role = crate::mappers::parse_column::<Role>("role", &row.role)?;
                Ok((role, row.count))
            })
            .collect()
    }

    #[instrument(skip(self, emails), fields(count = emails.len()))]
    async fn display_names(&self, emails: &[String]) -> RepoResult<HashMap<String, String>> {
        if emails.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT email, name FROM users WHERE email = ANY($1)",
        )
        .bind(emails)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(email, name)| {
                let shown = if name.trim().is_empty() { email.clone() } else { name };
                (email, shown)
            })
            .collect())
    }
}
