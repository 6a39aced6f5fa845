//! PostgreSQL implementation of FeedbackRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ngo_core::{
    DomainError, Feedback, FeedbackRepository, Identifier, IdentifierKind, NewFeedback, RepoResult,
};

use crate::models::FeedbackModel;

use super::error::{allocation_lock_key, map_db_error, map_unique_violation};

const FEEDBACK_COLUMNS: &str = "id, event_id, volunteer_id, rating, comment, submitted_at";

/// PostgreSQL implementation of FeedbackRepository
#[derive(Clone)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    /// Create a new PgFeedbackRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Feedback>> {
        let result = sqlx::query_as::<_, FeedbackModel>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Feedback::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, event_id: Option<&Identifier>) -> RepoResult<Vec<Feedback>> {
        let results = sqlx::query_as::<_, FeedbackModel>(&format!(
            r#"
            SELECT {FEEDBACK_COLUMNS}
            FROM feedback
            WHERE ($1::TEXT IS NULL OR event_id = $1)
            ORDER BY submitted_at DESC, id DESC
            "#
        ))
        .bind(event_id.map(ToString::to_string))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Feedback::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn exists_for(&self, submitter: &Identifier, event_id: &Identifier) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM feedback WHERE submitted_by = $1 AND event_id = $2)",
        )
        .bind(submitter.to_string())
        .bind(event_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, feedback), fields(event_id = %feedback.event_id))]
    async fn create(&self, feedback: &NewFeedback) -> RepoResult<Feedback> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(allocation_lock_key(IdentifierKind::Feedback))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let current_max = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(id) FROM feedback")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
        let id = Identifier::next(IdentifierKind::Feedback, current_max.as_deref())?;

        let model = sqlx::query_as::<_, FeedbackModel>(&format!(
            r#"
            INSERT INTO feedback
                (id, event_id, volunteer_id, submitted_by, rating, comment, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FEEDBACK_COLUMNS}
            "#
        ))
        .bind(id.to_string())
        .bind(feedback.event_id.to_string())
        .bind(feedback.visible_volunteer().map(|v| v.to_string()))
        .bind(feedback.submitter.to_string())
        .bind(feedback.rating)
        .bind(&feedback.comment)
        .bind(feedback.submitted_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::FeedbackAlreadySubmitted))?;

        tx.commit().await.map_err(map_db_error)?;

        Feedback::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &Identifier) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FeedbackNotFound(id.clone()));
        }

        Ok(())
    }
}
