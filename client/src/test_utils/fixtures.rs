//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use uuid::Uuid;

use crate::domain::entities::{
    AuthTokens, Comment, CommentId, ImageUpload, NewPost, Plant, Post, PostId, PostOwner,
    PublicUser, UserId, UserProfile,
};

/// Owner of posts created by `test_post`
pub fn test_owner_id() -> UserId {
    UserId::from("owner-1")
}

/// Create a test user with a specific id
pub fn test_user(id: &str) -> PublicUser {
    PublicUser {
        id: UserId::from(id),
        username: format!("user{}", id.replace('-', "")),
        profile_picture: None,
    }
}

/// Create a full profile for a user id
pub fn test_profile(id: &str) -> UserProfile {
    UserProfile {
        user: test_user(id),
        email: format!("{}@flowerly.test", id),
    }
}

/// Create a test post with default values
pub fn test_post(id: &str) -> Post {
    test_post_by(id, &test_owner_id())
}

/// Create a test post owned by a specific user
pub fn test_post_by(id: &str, owner: &UserId) -> Post {
    Post {
        id: PostId::from(id),
        owner: PostOwner::User(test_user(&owner.0)),
        plant_type: "Rose".to_string(),
        content: format!("Post {}", id),
        image_path: Some(format!("/uploads/{}.jpg", id)),
        liked_by: Vec::new(),
        comments_count: 0,
    }
}

/// Create posts with the given ids, in order
pub fn test_posts(ids: &[&str]) -> Vec<Post> {
    ids.iter().map(|id| test_post(id)).collect()
}

/// Create a new-post draft with a small image
pub fn test_new_post(owner: &UserId) -> NewPost {
    NewPost {
        owner: owner.clone(),
        plant_type: "Tulip".to_string(),
        content: "Tulips in the window".to_string(),
        image: test_image(),
    }
}

pub fn test_image() -> ImageUpload {
    ImageUpload::new("tulip.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

/// Create a comment by a user on a post
pub fn test_comment(post_id: &PostId, owner: &str, content: &str) -> Comment {
    Comment {
        id: CommentId(Uuid::new_v4().to_string()),
        post_id: post_id.clone(),
        content: content.to_string(),
        owner: test_user(owner),
    }
}

pub fn test_plant(id: i64, name: &str) -> Plant {
    Plant {
        id,
        name: name.to_string(),
        scientific_name: format!("{} officinalis", name),
        family_common_name: None,
        image_url: None,
    }
}

/// Tokens whose access token is a JWT expiring at `exp` (unix seconds)
pub fn test_tokens(user: &str, exp: i64) -> AuthTokens {
    AuthTokens {
        access_token: test_jwt(exp),
        refresh_token: format!("refresh-{}", Uuid::new_v4()),
        user_id: UserId::from(user),
    }
}

/// HS256 JWT carrying only an `exp` claim, signed with a throwaway secret
pub fn test_jwt(exp: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(
        &Header::default(),
        &serde_json::json!({ "exp": exp }),
        &EncodingKey::from_secret(b"flowerly-test-secret"),
    )
    .expect("Failed to encode test JWT")
}

/// Seconds since the epoch, offset by `delta`
pub fn now_plus(delta: i64) -> i64 {
    chrono::Utc::now().timestamp() + delta
}
