//! Donation entity <-> model mapper

use ngo_core::{Amount, Donation, DomainError, IdentifierKind, PaymentMethod};

use super::{corrupt_row, parse_column, parse_identifier};
use crate::models::DonationModel;

impl TryFrom<DonationModel> for Donation {
    type Error = DomainError;

    fn try_from(model: DonationModel) -> Result<Self, Self::Error> {
        Ok(Donation {
            id: model.id,
            donor_email: model.donor_email,
            event_id: parse_identifier(IdentifierKind::Event, &model.event_id)?,
            amount: Amount::from_cents(model.amount_cents)
                .map_err(|e| corrupt_row("amount_cents", e))?,
            payment_method: parse_column::<PaymentMethod>("payment_method", &model.payment_method)?,
            payment_reference: model.payment_reference,
            donated_at: model.donated_at,
        })
    }
}
