//! Value objects - immutable types that represent domain concepts

mod amount;
mod identifier;
mod photo;

pub use amount::{Amount, AmountError, MAX_AMOUNT_CENTS};
pub use identifier::{Identifier, IdentifierError, IdentifierKind};
pub use photo::{PhotoUpload, MAX_PHOTO_BYTES};
