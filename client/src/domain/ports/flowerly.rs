//! Flowerly API port traits
//!
//! Defines the interface for talking to the Flowerly REST API.
//! The HTTP adapter implements these; tests use in-memory fakes.

use async_trait::async_trait;

use crate::domain::entities::{
    AuthTokens, Comment, CommentId, Credentials, GoogleCredential, NewComment, NewPost, Plant,
    PlantDescription, Post, PostId, PostQuery, PostUpdate, ProfileUpdate, RefreshedTokens,
    RegisterOutcome, Registration, UserId, UserProfile,
};
use crate::error::ApiError;

/// Posts, likes and the paginated listing
#[async_trait]
pub trait PostApi: Send + Sync {
    /// List one page of posts, optionally for a single owner.
    /// Fewer than `query.limit` posts means there is nothing after this page.
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError>;

    /// Get a single post
    async fn get_post(&self, id: &PostId) -> Result<Post, ApiError>;

    /// Create a post with its image
    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError>;

    /// Update content/plant type and optionally replace the image
    async fn update_post(&self, id: &PostId, update: &PostUpdate) -> Result<Post, ApiError>;

    /// Delete a post
    async fn delete_post(&self, id: &PostId) -> Result<(), ApiError>;

    /// Like or unlike a post, returning the post with its new like set
    async fn toggle_like(&self, id: &PostId, user: &UserId) -> Result<Post, ApiError>;

    /// Whether `user` currently likes the post
    async fn has_liked(&self, id: &PostId, user: &UserId) -> Result<bool, ApiError>;
}

/// Comments on posts
#[async_trait]
pub trait CommentApi: Send + Sync {
    async fn comments_for_post(&self, post_id: &PostId) -> Result<Vec<Comment>, ApiError>;

    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, ApiError>;

    async fn delete_comment(&self, id: &CommentId) -> Result<(), ApiError>;
}

/// User profiles
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn get_user(&self, id: &UserId) -> Result<UserProfile, ApiError>;

    async fn update_user(&self, id: &UserId, update: &ProfileUpdate)
        -> Result<UserProfile, ApiError>;
}

/// Unauthenticated auth endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<RegisterOutcome, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, ApiError>;

    async fn google_login(&self, credential: &GoogleCredential) -> Result<AuthTokens, ApiError>;

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, ApiError>;
}

/// Plant catalog and the AI description helper
#[async_trait]
pub trait PlantApi: Send + Sync {
    async fn list_plants(&self) -> Result<Vec<Plant>, ApiError>;

    async fn describe_plant(&self, plant_type: &str) -> Result<PlantDescription, ApiError>;
}

/// Supplies the bearer token for authenticated requests
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// A currently valid access token, refreshing it first if needed.
    /// Fails with `ApiError::SessionExpired` when no valid token can be had.
    async fn access_token(&self) -> Result<String, ApiError>;
}
