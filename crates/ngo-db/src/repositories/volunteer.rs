//! PostgreSQL implementation of VolunteerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ngo_core::{Identifier, RepoResult, Volunteer, VolunteerRepository};

use crate::models::VolunteerModel;

use super::error::map_db_error;

/// PostgreSQL implementation of VolunteerRepository
#[derive(Clone)]
pub struct PgVolunteerRepository {
    pool: PgPool,
}

impl PgVolunteerRepository {
    /// Create a new PgVolunteerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VolunteerRepository for PgVolunteerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Volunteer>> {
        let result = sqlx::query_as::<_, VolunteerModel>(
            r#"
            SELECT id, name, email, phone, age
            FROM volunteers
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Volunteer::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Volunteer>> {
        let result = sqlx::query_as::<_, VolunteerModel>(
            r#"
            SELECT id, name, email, phone, age
            FROM volunteers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Volunteer::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM volunteers")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
