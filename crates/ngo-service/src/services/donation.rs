//! Donation service
//!
//! Records donations against events. Card payments must carry a number that
//! passes the Luhn check; only a masked, peppered reference is stored.

use ngo_core::{
    is_valid_card_number, normalize_email, require_admin, Actor, Amount, NewDonation,
};
use tracing::{info, instrument};
use validator::{ValidationError, ValidationErrors};

use crate::dto::{format_cents, DonateRequest, DonationResponse, DonationSummaryResponse};

use super::common::load_event;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Donation service
pub struct DonationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DonationService<'a> {
    /// Create a new DonationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a donation by `donor_email`
    #[instrument(
        skip(self, request),
        fields(event_id = %request.event_id, method = request.payment_method.as_str())
    )]
    pub async fn donate(
        &self,
        donor_email: &str,
        request: DonateRequest,
    ) -> ServiceResult<DonationResponse> {
        let event = load_event(self.ctx, &request.event_id).await?;

        let payment_reference = if request.payment_method.requires_card() {
            let card = check_card(request.card_number.as_deref())?;
            Some(self.ctx.payment_referencer().reference(card))
        } else {
            None
        };

        let draft = NewDonation {
            donor_email: normalize_email(donor_email),
            event_id: event.id,
            amount: request.amount,
            payment_method: request.payment_method,
            payment_reference,
            donated_at: self.ctx.clock().now(),
        };
        let donation = self.ctx.donation_repo().create(&draft).await?;

        info!(
            donation_id = donation.id,
            event_id = %donation.event_id,
            amount = %donation.amount,
            "Donation recorded"
        );
        Ok(DonationResponse::from(&donation))
    }

    /// Donations made by `email`, newest first
    #[instrument(skip(self))]
    pub async fn my_donations(&self, email: &str) -> ServiceResult<Vec<DonationResponse>> {
        let donations = self
            .ctx
            .donation_repo()
            .list_by_donor(&normalize_email(email))
            .await?;
        Ok(donations.iter().map(DonationResponse::from).collect())
    }

    /// Every donation with overall and today's totals (admin only)
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn donation_summary(&self, actor: &Actor) -> ServiceResult<DonationSummaryResponse> {
        require_admin(actor)?;
        let today = self.ctx.clock().today();
        let donations = self.ctx.donation_repo().list_all().await?;

        let total = Amount::sum_cents(donations.iter().map(|d| d.amount));
        let today_total = Amount::sum_cents(
            donations
                .iter()
                .filter(|d| d.donated_at.date() == today)
                .map(|d| d.amount),
        );

        Ok(DonationSummaryResponse {
            donation_count: donations.len(),
            total_amount: format_cents(total),
            today_amount: format_cents(today_total),
            donations: donations.iter().map(DonationResponse::from).collect(),
        })
    }
}

/// A card method needs a present, Luhn-valid number
fn check_card(card_number: Option<&str>) -> Result<&str, ValidationErrors> {
    let error = match card_number.map(str::trim).filter(|c| !c.is_empty()) {
        Some(card) if is_valid_card_number(card) => return Ok(card),
        Some(_) => {
            ValidationError::new("card_number").with_message("Card number is not valid.".into())
        }
        None => ValidationError::new("required")
            .with_message("Card number is required for card payments.".into()),
    };

    let mut errors = ValidationErrors::new();
    errors.add("card_number", error);
    Err(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_card() {
        assert_eq!(check_card(Some("4111 1111 1111 1111")).unwrap(), "4111 1111 1111 1111");
        assert!(check_card(Some("4111111111111112")).is_err());
        assert!(check_card(None).unwrap_err().field_errors().contains_key("card_number"));
        assert!(check_card(Some("  ")).is_err());
    }
}
