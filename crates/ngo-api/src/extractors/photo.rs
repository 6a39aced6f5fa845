//! Raw photo upload extractor
//!
//! The request body is the image itself. The media type comes from
//! `Content-Type` and the file name from the `filename` query parameter or
//! the `X-File-Name` header.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Query, Request},
    http::header,
};
use ngo_core::PhotoUpload;
use serde::Deserialize;

use crate::response::ApiError;

/// Header carrying the original file name
pub const FILE_NAME_HEADER: &str = "x-file-name";

#[derive(Debug, Default, Deserialize)]
struct FileNameQuery {
    filename: Option<String>,
}

/// Photo upload taken from a raw request body
#[derive(Debug, Clone)]
pub struct PhotoBody(pub PhotoUpload);

#[async_trait]
impl<S> FromRequest<S> for PhotoBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_default();

        let from_header = req
            .headers()
            .get(FILE_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let from_query = Query::<FileNameQuery>::try_from_uri(req.uri())
            .map_err(|e| ApiError::invalid_query(e.body_text()))?
            .0
            .filename;

        let file_name = from_query
            .or(from_header)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| {
                ApiError::invalid_query(
                    "A file name is required (filename query or X-File-Name header)",
                )
            })?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        Ok(PhotoBody(PhotoUpload::new(file_name, content_type, bytes.to_vec())))
    }
}
