//! Unified error types for the Flowerly client
//!
//! This module defines error types for each layer:
//! - `ApiError`: REST API transport and status errors
//! - `DomainError`: Validation and business rule errors
//! - `ConfigError`: Environment configuration errors
//! - `AppError`: Application layer errors (what services return to views)

use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Flowerly REST API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized - invalid or missing token")]
    Unauthorized,

    #[error("Session expired")]
    SessionExpired,

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(404),
            ApiError::Conflict(_) => Some(409),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Token persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt token file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Application layer errors - returned by services
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),

    #[error("Not logged in")]
    NotLoggedIn,
}

impl AppError {
    /// Flat message suitable for showing to a user
    pub fn user_message(&self) -> String {
        match self {
            AppError::Domain(DomainError::Validation(msg))
            | AppError::Domain(DomainError::Unauthorized(msg)) => msg.clone(),
            AppError::Domain(DomainError::NotFound(_)) | AppError::Api(ApiError::NotFound(_)) => {
                "Not found".to_string()
            }
            AppError::Domain(DomainError::Conflict(_)) | AppError::Api(ApiError::Conflict(_)) => {
                "Already exists".to_string()
            }
            AppError::Api(ApiError::SessionExpired) => {
                "Session expired, please log in again.".to_string()
            }
            AppError::Api(ApiError::Unauthorized)
            | AppError::NotLoggedIn => "Please log in first".to_string(),
            AppError::Api(e) => {
                tracing::warn!(error = %e, "API call failed");
                "Something went wrong talking to the server".to_string()
            }
            AppError::Store(e) => {
                tracing::warn!(error = %e, "Token store failed");
                "Could not access saved session".to_string()
            }
        }
    }
}
