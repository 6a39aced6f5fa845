//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ngo_core::{
    DomainError, Event, EventQuery, EventRepository, Identifier, IdentifierKind, NewEvent,
    RepoResult,
};

use crate::models::EventModel;

use super::contains_pattern;
use super::error::{allocation_lock_key, map_db_error, map_foreign_key_violation};

const EVENT_COLUMNS: &str = "id, title, description, location, start_date, end_date, \
     start_time, end_time, photo_url, status, created_by, created_at";

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Event::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &EventQuery) -> RepoResult<Vec<Event>> {
        let title_pattern = query.title.as_deref().map(contains_pattern);

        let results = sqlx::query_as::<_, EventModel>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE ($1::TEXT IS NULL OR title ILIKE $1)
              AND ($2::TEXT IS NULL OR LOWER(created_by) = LOWER($2))
            ORDER BY start_date, start_time, id
            "#
        ))
        .bind(title_pattern)
        .bind(query.created_by.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Event::try_from).collect()
    }

    #[instrument(skip(self, event), fields(title = %event.title))]
    async fn create(&self, event: &NewEvent) -> RepoResult<Event> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(allocation_lock_key(IdentifierKind::Event))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let current_max = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(id) FROM events")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
        let id = Identifier::next(IdentifierKind::Event, current_max.as_deref())?;

        let model = sqlx::query_as::<_, EventModel>(&format!(
            r#"
            INSERT INTO events (id, title, description, location, start_date, end_date,
                                start_time, end_time, photo_url, status, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id.to_string())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.schedule.start_date)
        .bind(event.schedule.end_date)
        .bind(event.schedule.start_time)
        .bind(event.schedule.end_time)
        .bind(event.photo_url.as_deref())
        .bind(event.status.as_str())
        .bind(event.created_by.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Event::try_from(model)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $2, description = $3, location = $4, start_date = $5, end_date = $6,
                start_time = $7, end_time = $8, photo_url = $9, status = $10
            WHERE id = $1
            "#,
        )
        .bind(event.id.to_string())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.photo_url.as_deref())
        .bind(event.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(event.id.clone()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &Identifier) -> RepoResult<()> {
        // Participations and feedback cascade; donations restrict
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_foreign_key_violation(e, || DomainError::EventHasDonations))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(id.clone()));
        }

        Ok(())
    }
}
