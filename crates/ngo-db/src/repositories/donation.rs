//! PostgreSQL implementation of DonationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ngo_core::{
    Donation, DonationRepository, DonationTally, DomainError, NewDonation, RepoResult,
};

use crate::models::{DonationModel, DonationTallyModel};

use super::error::{map_db_error, map_foreign_key_violation};

const DONATION_COLUMNS: &str =
    "id, donor_email, event_id, amount_cents, payment_method, payment_reference, donated_at";

/// PostgreSQL implementation of DonationRepository
#[derive(Clone)]
pub struct PgDonationRepository {
    pool: PgPool,
}

impl PgDonationRepository {
    /// Create a new PgDonationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonationRepository for PgDonationRepository {
    #[instrument(skip(self, donation), fields(event_id = %donation.event_id))]
    async fn create(&self, donation: &NewDonation) -> RepoResult<Donation> {
        let model = sqlx::query_as::<_, DonationModel>(&format!(
            r#"
            INSERT INTO donations (donor_email, event_id, amount_cents, payment_method,
                                   payment_reference, donated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {DONATION_COLUMNS}
            "#
        ))
        .bind(&donation.donor_email)
        .bind(donation.event_id.to_string())
        .bind(donation.amount.cents())
        .bind(donation.payment_method.as_str())
        .bind(donation.payment_reference.as_deref())
        .bind(donation.donated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::EventNotFound(donation.event_id.clone()))
        })?;

        Donation::try_from(model)
    }

    #[instrument(skip(self))]
    async fn list_by_donor(&self, email: &str) -> RepoResult<Vec<Donation>> {
        let results = sqlx::query_as::<_, DonationModel>(&format!(
            r#"
            SELECT {DONATION_COLUMNS}
            FROM donations
            WHERE donor_email = $1
            ORDER BY donated_at DESC, id DESC
            "#
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Donation::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Donation>> {
        let results = sqlx::query_as::<_, DonationModel>(&format!(
            "SELECT {DONATION_COLUMNS} FROM donations ORDER BY donated_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Donation::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn tallies(&self) -> RepoResult<Vec<DonationTally>> {
        let results = sqlx::query_as::<_, DonationTallyModel>(
            r#"
            SELECT donor_email AS email,
                   LEAST(SUM(amount_cents), 9223372036854775807)::BIGINT AS total_cents,
                   COUNT(*)::BIGINT AS donation_count,
                   MAX(donated_at) AS last_donation
            FROM donations
            GROUP BY donor_email
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DonationTally::from).collect())
    }
}
