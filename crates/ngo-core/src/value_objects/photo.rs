//! Photo uploads attached to events

use validator::{ValidationError, ValidationErrors};

/// Largest accepted photo, in bytes
pub const MAX_PHOTO_BYTES: usize = 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// An uploaded photo prior to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Lower-cased file extension, if any
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Check the content type, file extension and size.
    ///
    /// Every violation is reported under the `photo` field.
    pub fn check(&self, max_bytes: usize) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let type_ok = ALLOWED_CONTENT_TYPES
            .iter()
            .any(|t| self.content_type.eq_ignore_ascii_case(t));
        let ext_ok = self
            .extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));
        if !type_ok || !ext_ok {
            errors.add(
                "photo",
                ValidationError::new("photo_type")
                    .with_message("Only JPG and PNG photo is allowed.".into()),
            );
        }

        if self.bytes.len() > max_bytes {
            errors.add(
                "photo",
                ValidationError::new("photo_size")
                    .with_message("Photo size cannot more than 1MB.".into()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(name: &str, content_type: &str, size: usize) -> PhotoUpload {
        PhotoUpload::new(name, content_type, vec![0u8; size])
    }

    #[test]
    fn test_accepts_jpeg_and_png() {
        assert!(photo("a.jpg", "image/jpeg", 10).check(MAX_PHOTO_BYTES).is_ok());
        assert!(photo("a.JPEG", "image/jpeg", 10).check(MAX_PHOTO_BYTES).is_ok());
        assert!(photo("a.png", "image/png", MAX_PHOTO_BYTES).check(MAX_PHOTO_BYTES).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(photo("a.gif", "image/gif", 10).check(MAX_PHOTO_BYTES).is_err());
        assert!(photo("a.gif", "image/png", 10).check(MAX_PHOTO_BYTES).is_err());
        assert!(photo("noext", "image/png", 10).check(MAX_PHOTO_BYTES).is_err());
    }

    #[test]
    fn test_reports_every_violation() {
        let errors = photo("a.bmp", "image/bmp", MAX_PHOTO_BYTES + 1)
            .check(MAX_PHOTO_BYTES)
            .unwrap_err();
        let photo_errors = errors.field_errors().get("photo").map(|v| v.len());
        assert_eq!(photo_errors, Some(2));
    }
}
