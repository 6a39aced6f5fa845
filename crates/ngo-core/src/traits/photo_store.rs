//! Photo store port

use async_trait::async_trait;
use validator::ValidationErrors;

use crate::value_objects::PhotoUpload;

/// Photo storage errors
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("photo rejected: {0}")]
    Rejected(ValidationErrors),

    #[error("photo storage failed: {0}")]
    Storage(String),
}

/// Stores uploaded photos and hands back a public URL.
///
/// Implementations must refuse uploads failing [`PhotoUpload::check`].
#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn save(&self, upload: &PhotoUpload, folder: &str) -> Result<String, PhotoError>;

    async fn delete(&self, url: &str, folder: &str) -> Result<(), PhotoError>;
}
