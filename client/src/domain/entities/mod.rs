//! Domain entities
//!
//! Models for what the Flowerly API returns and accepts.

pub mod auth;
pub mod comment;
pub mod plant;
pub mod post;
pub mod user;

pub use auth::{
    AuthTokens, Credentials, GoogleCredential, RefreshedTokens, RegisterOutcome, Registration,
};
pub use comment::{Comment, CommentId, NewComment};
pub use plant::{Plant, PlantDescription};
pub use post::{FeedScope, NewPost, Post, PostId, PostOwner, PostQuery, PostUpdate};
pub use user::{Avatar, ImageUpload, ProfileUpdate, PublicUser, UserId, UserProfile};
