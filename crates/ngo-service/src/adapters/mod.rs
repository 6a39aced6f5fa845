//! Infrastructure adapters for the notifier and photo store ports

mod notifier;
mod photo_store;

pub use notifier::{LogNotifier, SmtpNotifier};
pub use photo_store::LocalPhotoStore;
