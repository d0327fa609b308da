//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use mockall::mock;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    AuthTokens, Comment, CommentId, Credentials, GoogleCredential, NewComment, NewPost, Plant,
    PlantDescription, Post, PostId, PostOwner, PostQuery, PostUpdate, ProfileUpdate,
    RefreshedTokens, RegisterOutcome, Registration, UserId, UserProfile,
};
use crate::domain::ports::{
    AccessTokenSource, AuthApi, CommentApi, PlantApi, PostApi, UserApi,
};
use crate::error::ApiError;

use super::fixtures::test_user;

fn mock_failure() -> ApiError {
    ApiError::Api {
        status: 503,
        message: "Mock failure".to_string(),
    }
}

// ============================================================================
// In-Memory Post API
// ============================================================================

#[derive(Default)]
pub struct InMemoryPostApi {
    posts: Arc<RwLock<Vec<Post>>>,
    /// Canned listing responses, consumed before the stored posts are used.
    /// `None` makes that call fail.
    scripted: Arc<RwLock<VecDeque<Option<Vec<Post>>>>>,
    list_calls: Arc<RwLock<Vec<PostQuery>>>,
    other_calls: Arc<RwLock<usize>>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl InMemoryPostApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let api = Self::default();
        *api.should_fail.write().unwrap() = true;
        api
    }

    /// Pre-populate with posts for testing
    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        self.posts.write().unwrap().extend(posts);
        self
    }

    /// Queue the response of the next unscripted `list_posts` call
    pub fn script_list(&self, response: Option<Vec<Post>>) {
        self.scripted.write().unwrap().push_back(response);
    }

    pub fn list_calls(&self) -> Vec<PostQuery> {
        self.list_calls.read().unwrap().clone()
    }

    /// Every call made against this API, listings included
    pub fn total_calls(&self) -> usize {
        self.list_calls.read().unwrap().len() + *self.other_calls.read().unwrap()
    }

    pub fn stored(&self, id: &PostId) -> Option<Post> {
        self.posts.read().unwrap().iter().find(|p| &p.id == id).cloned()
    }

    fn enter(&self) -> Result<(), ApiError> {
        *self.other_calls.write().unwrap() += 1;
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }
        Ok(())
    }
}

#[async_trait]
impl PostApi for InMemoryPostApi {
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError> {
        self.list_calls.write().unwrap().push(query.clone());

        if let Some(scripted) = self.scripted.write().unwrap().pop_front() {
            return scripted.ok_or_else(mock_failure);
        }
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }

        let posts = self.posts.read().unwrap();
        let skip = (query.page.saturating_sub(1) as usize) * query.limit;
        Ok(posts
            .iter()
            .filter(|p| query.owner.as_ref().map_or(true, |o| p.owner.id() == o))
            .skip(skip)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, ApiError> {
        self.enter()?;
        self.stored(id)
            .ok_or_else(|| ApiError::NotFound(format!("post {}", id)))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.enter()?;
        let created = Post {
            id: PostId(uuid::Uuid::new_v4().to_string()),
            owner: PostOwner::Id(post.owner.clone()),
            plant_type: post.plant_type.clone(),
            content: post.content.clone(),
            image_path: Some(format!("/uploads/{}", post.image.file_name)),
            liked_by: Vec::new(),
            comments_count: 0,
        };
        self.posts.write().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: &PostId, update: &PostUpdate) -> Result<Post, ApiError> {
        self.enter()?;
        let mut posts = self.posts.write().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("post {}", id)))?;
        post.plant_type = update.plant_type.clone();
        post.content = update.content.clone();
        if let Some(image) = &update.image {
            post.image_path = Some(format!("/uploads/{}", image.file_name));
        }
        Ok(post.clone())
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), ApiError> {
        self.enter()?;
        let mut posts = self.posts.write().unwrap();
        let before = posts.len();
        posts.retain(|p| &p.id != id);
        if posts.len() == before {
            return Err(ApiError::NotFound(format!("post {}", id)));
        }
        Ok(())
    }

    async fn toggle_like(&self, id: &PostId, user: &UserId) -> Result<Post, ApiError> {
        self.enter()?;
        let mut posts = self.posts.write().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("post {}", id)))?;
        if post.is_liked_by(user) {
            post.liked_by.retain(|u| u != user);
        } else {
            post.liked_by.push(user.clone());
        }
        Ok(post.clone())
    }

    async fn has_liked(&self, id: &PostId, user: &UserId) -> Result<bool, ApiError> {
        self.enter()?;
        self.stored(id)
            .map(|p| p.is_liked_by(user))
            .ok_or_else(|| ApiError::NotFound(format!("post {}", id)))
    }
}

// ============================================================================
// In-Memory Comment API
// ============================================================================

#[derive(Default)]
pub struct InMemoryCommentApi {
    comments: Arc<RwLock<Vec<Comment>>>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl InMemoryCommentApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(self, comments: Vec<Comment>) -> Self {
        self.comments.write().unwrap().extend(comments);
        self
    }

    pub fn set_failing(&self, fail: bool) {
        *self.should_fail.write().unwrap() = fail;
    }

    pub fn stored(&self) -> Vec<Comment> {
        self.comments.read().unwrap().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }
        Ok(())
    }
}

#[async_trait]
impl CommentApi for InMemoryCommentApi {
    async fn comments_for_post(&self, post_id: &PostId) -> Result<Vec<Comment>, ApiError> {
        self.check()?;
        Ok(self
            .comments
            .read()
            .unwrap()
            .iter()
            .filter(|c| &c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        self.check()?;
        let created = Comment {
            id: CommentId(uuid::Uuid::new_v4().to_string()),
            post_id: comment.post_id.clone(),
            content: comment.content.clone(),
            owner: test_user(&comment.owner.0),
        };
        self.comments.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_comment(&self, id: &CommentId) -> Result<(), ApiError> {
        self.check()?;
        let mut comments = self.comments.write().unwrap();
        let before = comments.len();
        comments.retain(|c| &c.id != id);
        if comments.len() == before {
            return Err(ApiError::NotFound(format!("comment {}", id)));
        }
        Ok(())
    }
}

// ============================================================================
// In-Memory User API
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserApi {
    users: Arc<RwLock<HashMap<UserId, UserProfile>>>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl InMemoryUserApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, profile: UserProfile) -> Self {
        self.users
            .write()
            .unwrap()
            .insert(profile.user.id.clone(), profile);
        self
    }
}

#[async_trait]
impl UserApi for InMemoryUserApi {
    async fn get_user(&self, id: &UserId) -> Result<UserProfile, ApiError> {
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }
        self.users
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))
    }

    async fn update_user(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ApiError> {
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }
        let mut users = self.users.write().unwrap();
        let profile = users
            .get_mut(id)
            .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))?;
        profile.user.username = update.username.clone();
        if let Some(image) = &update.image {
            profile.user.profile_picture = Some(format!("/uploads/{}", image.file_name));
        }
        Ok(profile.clone())
    }
}

// ============================================================================
// In-Memory Plant API
// ============================================================================

#[derive(Default)]
pub struct InMemoryPlantApi {
    plants: Arc<RwLock<Vec<Plant>>>,
    list_calls: Arc<RwLock<usize>>,
    pub should_fail: Arc<RwLock<bool>>,
}

impl InMemoryPlantApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let api = Self::default();
        *api.should_fail.write().unwrap() = true;
        api
    }

    pub fn with_plants(self, plants: Vec<Plant>) -> Self {
        self.plants.write().unwrap().extend(plants);
        self
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.read().unwrap()
    }
}

#[async_trait]
impl PlantApi for InMemoryPlantApi {
    async fn list_plants(&self) -> Result<Vec<Plant>, ApiError> {
        *self.list_calls.write().unwrap() += 1;
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }
        Ok(self.plants.read().unwrap().clone())
    }

    async fn describe_plant(&self, plant_type: &str) -> Result<PlantDescription, ApiError> {
        if *self.should_fail.read().unwrap() {
            return Err(mock_failure());
        }
        Ok(PlantDescription {
            description: format!("{} is a lovely plant.", plant_type),
        })
    }
}

// ============================================================================
// Access token source with a fixed token
// ============================================================================

pub struct StaticTokenSource(pub Option<String>);

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<String, ApiError> {
        self.0.clone().ok_or(ApiError::SessionExpired)
    }
}

// ============================================================================
// Auth API (mockall)
// ============================================================================

mock! {
    pub AuthApi {}

    #[async_trait]
    impl AuthApi for AuthApi {
        async fn register(&self, registration: &Registration) -> Result<RegisterOutcome, ApiError>;
        async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, ApiError>;
        async fn google_login(&self, credential: &GoogleCredential) -> Result<AuthTokens, ApiError>;
        async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, ApiError>;
    }
}
