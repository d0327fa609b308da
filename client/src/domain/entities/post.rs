//! Post domain entity
//!
//! A plant photo with its description, likes and comment count.

use serde::{Deserialize, Serialize};

use super::{ImageUpload, PublicUser, UserId};
use crate::error::DomainError;

/// Unique identifier for a post (server-assigned string id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for PostId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Post owner as returned by the API: either populated or a bare id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostOwner {
    User(PublicUser),
    Id(UserId),
}

impl PostOwner {
    pub fn id(&self) -> &UserId {
        match self {
            PostOwner::User(user) => &user.id,
            PostOwner::Id(id) => id,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            PostOwner::User(user) => Some(&user.username),
            PostOwner::Id(_) => None,
        }
    }
}

/// A post in the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(alias = "_id")]
    pub id: PostId,
    pub owner: PostOwner,
    #[serde(default)]
    pub plant_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub liked_by: Vec<UserId>,
    #[serde(default)]
    pub comments_count: u32,
}

impl Post {
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.liked_by.contains(user)
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner.id() == user
    }

    /// Absolute URL of the post image, if it has one
    pub fn image_url(&self, api_base_url: &str) -> Option<String> {
        self.image_path
            .as_deref()
            .map(|path| format!("{}{}", api_base_url.trim_end_matches('/'), path))
    }
}

/// Which posts a feed shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FeedScope {
    #[default]
    All,
    Owner(UserId),
}

impl FeedScope {
    pub fn owner(&self) -> Option<&UserId> {
        match self {
            FeedScope::All => None,
            FeedScope::Owner(id) => Some(id),
        }
    }
}

impl std::fmt::Display for FeedScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedScope::All => write!(f, "all"),
            FeedScope::Owner(id) => write!(f, "owner:{}", id),
        }
    }
}

/// One page request against the post listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub owner: Option<UserId>,
    /// 1-based page number
    pub page: u32,
    pub limit: usize,
}

/// Data needed to create a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub owner: UserId,
    pub plant_type: String,
    pub content: String,
    pub image: ImageUpload,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_fields(&self.plant_type, &self.content)?;
        if self.image.bytes.is_empty() {
            return Err(DomainError::Validation("An image is required".to_string()));
        }
        Ok(())
    }
}

/// Changes to an existing post; the image is kept when `image` is None
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub plant_type: String,
    pub content: String,
    pub image: Option<ImageUpload>,
}

impl PostUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_fields(&self.plant_type, &self.content)
    }
}

fn validate_fields(plant_type: &str, content: &str) -> Result<(), DomainError> {
    if plant_type.trim().is_empty() {
        return Err(DomainError::Validation(
            "Please select a plant type".to_string(),
        ));
    }
    if content.trim().is_empty() {
        return Err(DomainError::Validation(
            "Content cannot be empty".to_string(),
        ));
    }
    Ok(())
}
