//! Local filesystem photo store
//!
//! Files land in `<root>/<folder>/<uuid>.<ext>` and are served under
//! `<public_url>/<folder>/`.

use std::path::PathBuf;

use async_trait::async_trait;
use ngo_core::{PhotoError, PhotoStore, PhotoUpload};
use tracing::{debug, warn};
use uuid::Uuid;

/// Photo store writing to a local directory
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    root: PathBuf,
    public_url: String,
    max_bytes: usize,
}

impl LocalPhotoStore {
    pub fn new(root: impl Into<PathBuf>, public_url: &str, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    fn url_prefix(&self, folder: &str) -> String {
        format!("{}/{folder}/", self.public_url)
    }

    /// File name behind a URL this store issued, if it is one
    fn file_name<'u>(&self, url: &'u str, folder: &str) -> Option<&'u str> {
        let name = url.strip_prefix(&self.url_prefix(folder))?;
        let plain = !name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.');
        plain.then_some(name)
    }
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn save(&self, upload: &PhotoUpload, folder: &str) -> Result<String, PhotoError> {
        upload.check(self.max_bytes).map_err(PhotoError::Rejected)?;
        let extension = upload.extension().unwrap_or_else(|| "jpg".to_string());

        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| PhotoError::Storage(e.to_string()))?;

        let name = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(dir.join(&name), &upload.bytes)
            .await
            .map_err(|e| PhotoError::Storage(e.to_string()))?;

        debug!(folder = %folder, name = %name, bytes = upload.bytes.len(), "Photo stored");
        Ok(format!("{}{name}", self.url_prefix(folder)))
    }

    async fn delete(&self, url: &str, folder: &str) -> Result<(), PhotoError> {
        let Some(name) = self.file_name(url, folder) else {
            warn!(url = %url, "Not a stored photo URL, nothing deleted");
            return Ok(());
        };

        match tokio::fs::remove_file(self.root.join(folder).join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PhotoError::Storage(e.to_string())),
        }
    }
}
