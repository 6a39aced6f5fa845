//! PostgreSQL implementation of ParticipationRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use ngo_core::{
    ApprovalStatus, CompletionStatus, DomainError, Enrollment, Identifier, IdentifierKind,
    NewSignup, Participation, ParticipationRepository, ParticipationStatus, RepoResult,
    Volunteer, VolunteerDetails, VolunteerTally,
};

use crate::models::{EnrollmentModel, ParticipationModel, VolunteerModel, VolunteerTallyModel};

use super::error::{
    allocation_lock_key, map_db_error, map_foreign_key_violation, map_unique_violation,
};

const PARTICIPATION_COLUMNS: &str = "id, volunteer_id, event_id, shift_start, work_hours, \
     points, completion, approval, created_at";

const ENROLLMENT_SELECT: &str = r#"
    SELECT p.id, p.volunteer_id, p.event_id, p.shift_start, p.work_hours, p.points,
           p.completion, p.approval, p.created_at,
           v.name AS volunteer_name, v.email AS volunteer_email,
           v.phone AS volunteer_phone, v.age AS volunteer_age
    FROM participations p
    JOIN volunteers v ON v.id = p.volunteer_id
"#;

/// PostgreSQL implementation of ParticipationRepository
#[derive(Clone)]
pub struct PgParticipationRepository {
    pool: PgPool,
}

impl PgParticipationRepository {
    /// Create a new PgParticipationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return the volunteer registered under the e-mail, creating it if absent.
    ///
    /// An existing record is reused unchanged.
    async fn find_or_create_volunteer(
        tx: &mut Transaction<'_, Postgres>,
        details: &VolunteerDetails,
    ) -> RepoResult<Volunteer> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(allocation_lock_key(IdentifierKind::Volunteer))
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

        let existing = sqlx::query_as::<_, VolunteerModel>(
            "SELECT id, name, email, phone, age FROM volunteers WHERE email = $1",
        )
        .bind(&details.email)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = existing {
            return Volunteer::try_from(model);
        }

        let current_max = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(id) FROM volunteers")
            .fetch_one(&mut **tx)
            .await
            .map_err(map_db_error)?;
        let id = Identifier::next(IdentifierKind::Volunteer, current_max.as_deref())?;

        let model = sqlx::query_as::<_, VolunteerModel>(
            r#"
            INSERT INTO volunteers (id, name, email, phone, age)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, age
            "#,
        )
        .bind(id.to_string())
        .bind(&details.name)
        .bind(&details.email)
        .bind(&details.phone)
        .bind(details.age)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Volunteer::try_from(model)
    }

    /// Explain why a guarded update matched no row
    async fn guard_failure(&self, id: i64) -> DomainError {
        match self.find_by_id(id).await {
            Ok(Some(_)) => DomainError::ConcurrentModification,
            Ok(None) => DomainError::ParticipationNotFound(id),
            Err(e) => e,
        }
    }
}

#[async_trait]
impl ParticipationRepository for PgParticipationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Participation>> {
        let result = sqlx::query_as::<_, ParticipationModel>(&format!(
            "SELECT {PARTICIPATION_COLUMNS} FROM participations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Participation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_event_and_email(
        &self,
        event_id: &Identifier,
        email: &str,
    ) -> RepoResult<Option<Participation>> {
        let result = sqlx::query_as::<_, ParticipationModel>(
            r#"
            SELECT p.id, p.volunteer_id, p.event_id, p.shift_start, p.work_hours, p.points,
                   p.completion, p.approval, p.created_at
            FROM participations p
            JOIN volunteers v ON v.id = p.volunteer_id
            WHERE p.event_id = $1 AND v.email = $2
            "#,
        )
        .bind(event_id.to_string())
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Participation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_event(&self, event_id: &Identifier) -> RepoResult<Vec<Enrollment>> {
        let results = sqlx::query_as::<_, EnrollmentModel>(&format!(
            "{ENROLLMENT_SELECT} WHERE p.event_id = $1 ORDER BY p.shift_start, p.id"
        ))
        .bind(event_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Enrollment::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_by_email(&self, email: &str) -> RepoResult<Vec<Participation>> {
        let results = sqlx::query_as::<_, ParticipationModel>(
            r#"
            SELECT p.id, p.volunteer_id, p.event_id, p.shift_start, p.work_hours, p.points,
                   p.completion, p.approval, p.created_at
            FROM participations p
            JOIN volunteers v ON v.id = p.volunteer_id
            WHERE v.email = $1
            ORDER BY p.shift_start DESC, p.id DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Participation::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_pending(&self, created_by: Option<&str>) -> RepoResult<Vec<Enrollment>> {
        let results = sqlx::query_as::<_, EnrollmentModel>(&format!(
            r#"
            {ENROLLMENT_SELECT}
            JOIN events e ON e.id = p.event_id
            WHERE p.approval = 'pending'
              AND ($1::TEXT IS NULL OR LOWER(e.created_by) = LOWER($1))
            ORDER BY p.created_at, p.id
            "#
        ))
        .bind(created_by)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Enrollment::try_from).collect()
    }

    #[instrument(skip(self, signup), fields(event_id = %signup.participation.event_id))]
    async fn sign_up(&self, signup: &NewSignup) -> RepoResult<Enrollment> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let volunteer = Self::find_or_create_volunteer(&mut tx, &signup.volunteer).await?;
        let draft = &signup.participation;

        let model = sqlx::query_as::<_, ParticipationModel>(&format!(
            r#"
            INSERT INTO participations (volunteer_id, event_id, shift_start, work_hours, points)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PARTICIPATION_COLUMNS}
            "#
        ))
        .bind(volunteer.id.to_string())
        .bind(draft.event_id.to_string())
        .bind(draft.shift_start)
        .bind(draft.work_hours)
        .bind(draft.points)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|d| d.is_foreign_key_violation()) {
                map_foreign_key_violation(e, || DomainError::EventNotFound(draft.event_id.clone()))
            } else {
                map_unique_violation(e, || DomainError::DuplicateSignup)
            }
        })?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Enrollment {
            participation: Participation::try_from(model)?,
            volunteer,
        })
    }

    #[instrument(skip(self))]
    async fn update_approval(
        &self,
        id: i64,
        expected: ParticipationStatus,
        target: ApprovalStatus,
    ) -> RepoResult<Participation> {
        let result = sqlx::query_as::<_, ParticipationModel>(&format!(
            r#"
            UPDATE participations SET approval = $4
            WHERE id = $1 AND approval = $2 AND completion = $3
            RETURNING {PARTICIPATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(expected.approval.as_str())
        .bind(expected.completion.as_str())
        .bind(target.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Participation::try_from(model),
            None => Err(self.guard_failure(id).await),
        }
    }

    #[instrument(skip(self))]
    async fn update_completion(
        &self,
        id: i64,
        expected: ParticipationStatus,
        target: CompletionStatus,
    ) -> RepoResult<Participation> {
        let result = sqlx::query_as::<_, ParticipationModel>(&format!(
            r#"
            UPDATE participations SET completion = $4
            WHERE id = $1 AND approval = $2 AND completion = $3
            RETURNING {PARTICIPATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(expected.approval.as_str())
        .bind(expected.completion.as_str())
        .bind(target.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Participation::try_from(model),
            None => Err(self.guard_failure(id).await),
        }
    }

    #[instrument(skip(self))]
    async fn approved_tallies(&self) -> RepoResult<Vec<VolunteerTally>> {
        let results = sqlx::query_as::<_, VolunteerTallyModel>(
            r#"
            SELECT v.email AS email,
                   COALESCE(SUM(p.points), 0)::BIGINT AS points,
                   COUNT(*)::BIGINT AS event_count,
                   MAX(p.shift_start) AS last_shift
            FROM participations p
            JOIN volunteers v ON v.id = p.volunteer_id
            WHERE p.approval = 'approved'
            GROUP BY v.email
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(VolunteerTally::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_pending(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM participations WHERE approval = 'pending'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
