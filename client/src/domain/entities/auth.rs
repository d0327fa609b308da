//! Authentication entities
//!
//! Login credentials, registration data and the token pair the API hands
//! back after a successful login.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ImageUpload, UserId};
use crate::error::DomainError;

pub const PASSWORD_MIN_LENGTH: usize = 6;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// Email and password login
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::Validation(
                "Password is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Google sign-in credential (the ID token from the Google button)
#[derive(Debug, Clone, Serialize)]
pub struct GoogleCredential {
    pub credential: String,
}

/// Account registration form
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub profile_picture: Option<ImageUpload>,
}

impl Registration {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_email(&self.email)?;
        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_LENGTH
            )));
        }
        if self.password != self.confirm_password {
            return Err(DomainError::Validation(
                "Passwords do not match".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a registration attempt the server answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    AlreadyExists,
}

/// Tokens returned by login, google sign-in and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(rename = "_id")]
    pub user_id: UserId,
}

/// Token pair returned by the refresh endpoint (no user id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::Validation("Email is required".to_string()));
    }
    if !email_pattern().is_match(email) {
        return Err(DomainError::Validation("Invalid email format".to_string()));
    }
    Ok(())
}
