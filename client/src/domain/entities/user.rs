//! User domain entity
//!
//! Users as the Flowerly API exposes them: a public view (shown on posts and
//! comments) and the full profile (only returned for the logged-in user).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Unique identifier for a user (server-assigned string id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user as shown next to posts and comments (no email)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl PublicUser {
    /// Either an absolute avatar URL or the initial to draw instead
    pub fn avatar(&self, api_base_url: &str) -> Avatar {
        match self.profile_picture.as_deref() {
            Some(path) if !path.is_empty() => {
                Avatar::Url(format!("{}{}", api_base_url.trim_end_matches('/'), path))
            }
            _ => Avatar::Initial(
                self.username
                    .chars()
                    .next()
                    .map(|c| c.to_uppercase().collect())
                    .unwrap_or_default(),
            ),
        }
    }
}

/// How to render a user's avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Url(String),
    Initial(String),
}

/// The logged-in user's own profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: PublicUser,
    pub email: String,
}

/// Binary image attached to a multipart request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Changes to the logged-in user's profile
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub username: String,
    pub image: Option<ImageUpload>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_username(&self.username)
    }
}

static USERNAME_CHARS: OnceLock<Regex> = OnceLock::new();

/// Username: at least one character, at least one letter, only letters,
/// digits and `?!@.`
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::Validation(
            "Username must have at least one character".to_string(),
        ));
    }
    if !username.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::Validation(
            "Username must contain at least one letter".to_string(),
        ));
    }
    let allowed = USERNAME_CHARS
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9?!@.]+$").expect("username pattern compiles"));
    if !allowed.is_match(username) {
        return Err(DomainError::Validation(
            "Only letters, numbers, dots (.), and ?!@ are allowed".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(picture: Option<&str>) -> PublicUser {
        PublicUser {
            id: UserId::from("u1"),
            username: "rose".to_string(),
            profile_picture: picture.map(String::from),
        }
    }

    #[test]
    fn avatar_uses_picture_when_present() {
        let avatar = user(Some("/uploads/rose.png")).avatar("http://localhost:3000/");
        assert_eq!(
            avatar,
            Avatar::Url("http://localhost:3000/uploads/rose.png".to_string())
        );
    }

    #[test]
    fn avatar_falls_back_to_initial() {
        assert_eq!(
            user(None).avatar("http://localhost:3000"),
            Avatar::Initial("R".to_string())
        );
        assert_eq!(
            user(Some("")).avatar("http://localhost:3000"),
            Avatar::Initial("R".to_string())
        );
    }

    #[test]
    fn profile_deserializes_flattened() {
        let json = r#"{"_id":"abc","username":"lily","email":"lily@example.com","profilePicture":"/p.png"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user.id, UserId::from("abc"));
        assert_eq!(profile.user.username, "lily");
        assert_eq!(profile.user.profile_picture.as_deref(), Some("/p.png"));
        assert_eq!(profile.email, "lily@example.com");
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("fern.lover!").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("12345").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("under_score").is_err());
    }

    #[test]
    fn image_upload_guesses_mime() {
        assert_eq!(ImageUpload::new("a.JPG", vec![]).mime_type, "image/jpeg");
        assert_eq!(ImageUpload::new("b.png", vec![]).mime_type, "image/png");
        assert_eq!(
            ImageUpload::new("noext", vec![]).mime_type,
            "application/octet-stream"
        );
    }
}
