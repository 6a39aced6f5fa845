//! Posting service
//!
//! Gallery postings: a title and a required photo, managed by the admin or
//! the organiser who created them. Reading the gallery needs no account.

use ngo_core::{
    require_event_manager, require_posting_access, Actor, DomainError, IdentifierKind,
    NewPosting, PhotoUpload, Posting, PostingQuery,
};
use tracing::{info, instrument, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::{CreatePostingRequest, PostingListQuery, PostingResponse, UpdatePostingRequest};

use super::common::{absorb, into_result, parse_id};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Folder posting photos are stored under
pub const POSTING_PHOTO_FOLDER: &str = "postings";

/// Posting service
pub struct PostingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a posting owned by the caller
    #[instrument(skip(self, request, photo), fields(actor = %actor.email, title = %request.title))]
    pub async fn create_posting(
        &self,
        actor: &Actor,
        request: CreatePostingRequest,
        photo: Option<PhotoUpload>,
    ) -> ServiceResult<PostingResponse> {
        require_event_manager(actor)?;

        let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);
        let Some(upload) = photo else {
            errors.add(
                "photo",
                ValidationError::new("required").with_message("Photo is required.".into()),
            );
            return Err(errors.into());
        };
        if let Err(photo_errors) = upload.check(self.ctx.settings().max_photo_bytes) {
            absorb(&mut errors, &photo_errors, &["photo"]);
        }
        into_result(errors)?;

        let photo_url = self.ctx.photo_store().save(&upload, POSTING_PHOTO_FOLDER).await?;
        let draft = NewPosting {
            title: request.title.trim().to_string(),
            photo_url: photo_url.clone(),
            created_by: Some(actor.email.clone()),
        };

        let posting = match self.ctx.posting_repo().create(&draft).await {
            Ok(posting) => posting,
            Err(err) => {
                self.discard_photo(&photo_url).await;
                return Err(err.into());
            }
        };

        info!(posting_id = %posting.id, "Posting created");
        Ok(PostingResponse::from(&posting))
    }

    /// Rename a posting
    #[instrument(skip(self, request), fields(actor = %actor.email))]
    pub async fn update_posting(
        &self,
        actor: &Actor,
        posting_id: &str,
        request: UpdatePostingRequest,
    ) -> ServiceResult<PostingResponse> {
        let mut posting = self.load_posting(posting_id).await?;
        require_posting_access(actor, &posting)?;
        request.validate()?;

        if let Some(title) = request.title.as_deref() {
            posting.title = title.trim().to_string();
        }
        self.ctx.posting_repo().update(&posting).await?;

        info!(posting_id = %posting.id, "Posting updated");
        Ok(PostingResponse::from(&posting))
    }

    /// Replace the posting photo; the previous asset is deleted
    #[instrument(skip(self, upload), fields(actor = %actor.email, file_name = %upload.file_name))]
    pub async fn set_posting_photo(
        &self,
        actor: &Actor,
        posting_id: &str,
        upload: PhotoUpload,
    ) -> ServiceResult<PostingResponse> {
        let mut posting = self.load_posting(posting_id).await?;
        require_posting_access(actor, &posting)?;
        upload.check(self.ctx.settings().max_photo_bytes)?;

        let url = self.ctx.photo_store().save(&upload, POSTING_PHOTO_FOLDER).await?;
        let previous = std::mem::replace(&mut posting.photo_url, url.clone());

        if let Err(err) = self.ctx.posting_repo().update(&posting).await {
            self.discard_photo(&url).await;
            return Err(err.into());
        }
        self.discard_photo(&previous).await;

        info!(posting_id = %posting.id, "Posting photo replaced");
        Ok(PostingResponse::from(&posting))
    }

    /// Delete a posting and its photo
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn delete_posting(&self, actor: &Actor, posting_id: &str) -> ServiceResult<()> {
        let posting = self.load_posting(posting_id).await?;
        require_posting_access(actor, &posting)?;

        self.ctx.posting_repo().delete(&posting.id).await?;
        self.discard_photo(&posting.photo_url).await;

        info!(posting_id = %posting.id, "Posting deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_posting(&self, posting_id: &str) -> ServiceResult<PostingResponse> {
        let posting = self.load_posting(posting_id).await?;
        Ok(PostingResponse::from(&posting))
    }

    /// Every posting, oldest identifier first
    #[instrument(skip(self))]
    pub async fn gallery(&self) -> ServiceResult<Vec<PostingResponse>> {
        self.list(&PostingQuery::default()).await
    }

    /// Postings the caller manages: all for admins, their own for organisers
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn list_managed_postings(
        &self,
        actor: &Actor,
        query: PostingListQuery,
    ) -> ServiceResult<Vec<PostingResponse>> {
        require_event_manager(actor)?;
        let query = PostingQuery {
            title: query
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            created_by: (!actor.is_admin()).then(|| actor.email.clone()),
        };
        self.list(&query).await
    }

    async fn list(&self, query: &PostingQuery) -> ServiceResult<Vec<PostingResponse>> {
        let postings = self.ctx.posting_repo().list(query).await?;
        Ok(postings.iter().map(PostingResponse::from).collect())
    }

    async fn load_posting(&self, raw_id: &str) -> ServiceResult<Posting> {
        let id = parse_id(IdentifierKind::Posting, raw_id)?;
        let posting = self
            .ctx
            .posting_repo()
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::PostingNotFound(id))?;
        Ok(posting)
    }

    async fn discard_photo(&self, url: &str) {
        if let Err(err) = self.ctx.photo_store().delete(url, POSTING_PHOTO_FOLDER).await {
            warn!(url = %url, error = %err, "Failed to delete posting photo");
        }
    }
}
