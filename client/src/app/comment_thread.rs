//! Comment thread
//!
//! The comments under one post: loaded once, then kept in step with the
//! comments this client adds or deletes.

use std::sync::Arc;

use crate::domain::entities::{Comment, CommentId, NewComment, PostId, UserId};
use crate::domain::ports::CommentApi;
use crate::error::AppError;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load comments";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add comment";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete comment";

pub struct CommentThread<C>
where
    C: CommentApi,
{
    comments_api: Arc<C>,
    post_id: PostId,
    comments: Vec<Comment>,
    loading: bool,
    error: Option<String>,
}

impl<C> CommentThread<C>
where
    C: CommentApi,
{
    pub fn new(comments_api: Arc<C>, post_id: PostId) -> Self {
        Self {
            comments_api,
            post_id,
            comments: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch all comments; on failure the error is set and the list kept
    pub async fn load(&mut self) {
        self.loading = true;
        match self.comments_api.comments_for_post(&self.post_id).await {
            Ok(comments) => {
                self.comments = comments;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(post_id = %self.post_id, error = %e, "Failed to load comments");
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.loading = false;
    }

    /// Post a comment and append it; errors are both recorded and returned
    pub async fn add(&mut self, owner: &UserId, content: &str) -> Result<Comment, AppError> {
        let comment = NewComment {
            post_id: self.post_id.clone(),
            owner: owner.clone(),
            content: content.trim().to_string(),
        };
        comment.validate()?;

        match self.comments_api.add_comment(&comment).await {
            Ok(created) => {
                self.comments.push(created.clone());
                Ok(created)
            }
            Err(e) => {
                tracing::warn!(post_id = %self.post_id, error = %e, "Failed to add comment");
                self.error = Some(ADD_FAILED_MESSAGE.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn delete(&mut self, id: &CommentId) -> Result<(), AppError> {
        if let Err(e) = self.comments_api.delete_comment(id).await {
            tracing::warn!(comment_id = %id, error = %e, "Failed to delete comment");
            self.error = Some(DELETE_FAILED_MESSAGE.to_string());
            return Err(e.into());
        }
        self.comments.retain(|c| &c.id != id);
        Ok(())
    }
}
