//! PostgreSQL implementation of PostingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ngo_core::{
    DomainError, Identifier, IdentifierKind, NewPosting, Posting, PostingQuery,
    PostingRepository, RepoResult,
};

use crate::models::PostingModel;

use super::contains_pattern;
use super::error::{allocation_lock_key, map_db_error};

const POSTING_COLUMNS: &str = "id, title, photo_url, created_by, created_at";

/// PostgreSQL implementation of PostingRepository
#[derive(Clone)]
pub struct PgPostingRepository {
    pool: PgPool,
}

impl PgPostingRepository {
    /// Create a new PgPostingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostingRepository for PgPostingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Posting>> {
        let result = sqlx::query_as::<_, PostingModel>(&format!(
            "SELECT {POSTING_COLUMNS} FROM postings WHERE id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Posting::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &PostingQuery) -> RepoResult<Vec<Posting>> {
        let title_pattern = query.title.as_deref().map(contains_pattern);

        let results = sqlx::query_as::<_, PostingModel>(&format!(
            r#"
            SELECT {POSTING_COLUMNS}
            FROM postings
            WHERE ($1::TEXT IS NULL OR title ILIKE $1)
              AND ($2::TEXT IS NULL OR LOWER(created_by) = LOWER($2))
            ORDER BY id
            "#
        ))
        .bind(title_pattern)
        .bind(query.created_by.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Posting::try_from).collect()
    }

    #[instrument(skip(self, posting), fields(title = %posting.title))]
    async fn create(&self, posting: &NewPosting) -> RepoResult<Posting> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(allocation_lock_key(IdentifierKind::Posting))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let current_max = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(id) FROM postings")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
        let id = Identifier::next(IdentifierKind::Posting, current_max.as_deref())?;

        let model = sqlx::query_as::<_, PostingModel>(&format!(
            r#"
            INSERT INTO postings (id, title, photo_url, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {POSTING_COLUMNS}
            "#
        ))
        .bind(id.to_string())
        .bind(&posting.title)
        .bind(&posting.photo_url)
        .bind(posting.created_by.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Posting::try_from(model)
    }

    #[instrument(skip(self, posting), fields(posting_id = %posting.id))]
    async fn update(&self, posting: &Posting) -> RepoResult<()> {
        let result = sqlx::query("UPDATE postings SET title = $2, photo_url = $3 WHERE id = $1")
            .bind(posting.id.to_string())
            .bind(&posting.title)
            .bind(&posting.photo_url)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostingNotFound(posting.id.clone()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &Identifier) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM postings WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostingNotFound(id.clone()));
        }

        Ok(())
    }
}
