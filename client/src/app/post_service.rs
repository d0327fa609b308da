//! Post service
//!
//! Creating, editing, deleting and liking posts. Feed views keep their
//! `FeedPager` in step with the returned posts via `replace_locally` and
//! `remove_locally`.

use std::sync::Arc;

use crate::domain::entities::{NewPost, Post, PostId, PostUpdate, UserId};
use crate::domain::ports::PostApi;
use crate::error::{AppError, DomainError};

pub struct PostService<P>
where
    P: PostApi,
{
    posts: Arc<P>,
}

impl<P> PostService<P>
where
    P: PostApi,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn get(&self, id: &PostId) -> Result<Post, AppError> {
        Ok(self.posts.get_post(id).await?)
    }

    pub async fn create(&self, post: &NewPost) -> Result<Post, AppError> {
        post.validate()?;
        let created = self.posts.create_post(post).await?;
        tracing::info!(post_id = %created.id, plant_type = %created.plant_type, "Post created");
        Ok(created)
    }

    /// Edit a post. Only its owner may edit it.
    pub async fn update(
        &self,
        editor: &UserId,
        id: &PostId,
        update: &PostUpdate,
    ) -> Result<Post, AppError> {
        update.validate()?;
        let existing = self.posts.get_post(id).await?;
        ensure_owner(&existing, editor)?;
        let updated = self.posts.update_post(id, update).await?;
        tracing::info!(post_id = %id, "Post updated");
        Ok(updated)
    }

    /// Delete a post. Only its owner may delete it.
    pub async fn delete(&self, requester: &UserId, id: &PostId) -> Result<(), AppError> {
        let existing = self.posts.get_post(id).await?;
        ensure_owner(&existing, requester)?;
        self.posts.delete_post(id).await?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Toggle the user's like; returns the post with its new like set
    pub async fn toggle_like(&self, user: &UserId, id: &PostId) -> Result<Post, AppError> {
        let post = self.posts.toggle_like(id, user).await?;
        tracing::debug!(
            post_id = %id,
            liked = post.is_liked_by(user),
            likes = post.like_count(),
            "Like toggled"
        );
        Ok(post)
    }

    pub async fn has_liked(&self, user: &UserId, id: &PostId) -> Result<bool, AppError> {
        Ok(self.posts.has_liked(id, user).await?)
    }
}

fn ensure_owner(post: &Post, user: &UserId) -> Result<(), AppError> {
    if !post.is_owned_by(user) {
        return Err(DomainError::Unauthorized(format!(
            "Post {} belongs to another user",
            post.id
        ))
        .into());
    }
    Ok(())
}
